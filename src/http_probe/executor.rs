use std::future::Future;

use reqwest::{Client, Request, Response};

/// Anything that can execute a single HTTP request and hand back the response it got.
///
/// Implementations must return the first response verbatim. A client that follows redirects
/// on its own would hide exactly the hop the probe is meant to inspect, so the production
/// client is built with `redirect::Policy::none()` (see `config::app_config::build_client`).
pub trait HttpExecutor {
    fn execute(&self, request: Request) -> impl Future<Output = reqwest::Result<Response>> + Send;
}

impl HttpExecutor for Client {
    fn execute(&self, request: Request) -> impl Future<Output = reqwest::Result<Response>> + Send {
        Client::execute(self, request)
    }
}
