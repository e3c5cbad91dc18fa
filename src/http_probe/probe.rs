use std::collections::HashSet;

use reqwest::{Method, Request, header::LOCATION};
use url::Url;

use super::prelude::*;

/// Canonical string form used on both sides of the destination membership check.
pub fn canonical_url(url: Url) -> String {
    url.into()
}

/// Requests `target` once and validates the first response as an accepted redirect.
///
/// The gates run in order and the first failing one decides the error:
/// request construction, execution, status code, presence of `Location`, parsing of
/// `Location`, and finally membership of the normalized location in `accepted_destinations`.
/// A relative `Location` is resolved against `target` before it is normalized.
///
/// The response is never read past its headers; it is dropped on every path out of this
/// function, which hands the connection back to the client.
pub async fn check_redirect<E: HttpExecutor>(
    executor: &E,
    target: &str,
    accepted_codes: &HashSet<u16>,
    accepted_destinations: &HashSet<String>,
) -> Result<RedirectResult, ProbeError> {
    let target_url = Url::parse(target).map_err(ProbeError::ConstructRequest)?;
    let request = Request::new(Method::GET, target_url.clone());

    log::debug!("Requesting {target_url}");
    let response = executor
        .execute(request)
        .await
        .map_err(ProbeError::ExecuteRequest)?;

    let status_code = response.status().as_u16();
    if !accepted_codes.contains(&status_code) {
        log::debug!("Rejecting status {status_code} (accepted: {accepted_codes:?})");
        return Err(ProbeError::UnexpectedStatus(status_code));
    }

    let location = match response.headers().get(LOCATION) {
        Some(value) if !value.is_empty() => String::from_utf8_lossy(value.as_bytes()).into_owned(),
        _ => return Err(ProbeError::LocationHeaderNotFound),
    };
    drop(response);
    log::debug!("Received status {status_code} with location {location:?}");

    let location = target_url
        .join(&location)
        .map(canonical_url)
        .map_err(ProbeError::ParseLocation)?;

    if !accepted_destinations.contains(&location) {
        log::debug!("Rejecting location {location:?} (accepted: {accepted_destinations:?})");
        return Err(ProbeError::InvalidRedirectTarget(location));
    }

    Ok(RedirectResult {
        status_code,
        location,
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::Response;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::app_config::build_client;
    use crate::config::parse::{parse_codes, parse_urls};

    const TARGET: &str = "https://example.com/";

    struct FakeExecutor {
        code: u16,
        location: Option<&'static str>,
    }

    impl FakeExecutor {
        fn redirect(code: u16, location: &'static str) -> Self {
            FakeExecutor {
                code,
                location: Some(location),
            }
        }
    }

    impl HttpExecutor for FakeExecutor {
        async fn execute(&self, request: Request) -> reqwest::Result<Response> {
            assert_eq!(request.method(), Method::GET);

            let mut builder = hyper::Response::builder().status(self.code);
            if let Some(location) = self.location {
                builder = builder.header(LOCATION, location);
            }
            let response = builder
                .body("hello world")
                .expect("canned response should be valid");
            Ok(Response::from(response))
        }
    }

    async fn check(
        executor: &FakeExecutor,
        codes: &str,
        destinations: &str,
    ) -> Result<RedirectResult, ProbeError> {
        let codes = parse_codes(codes).expect("codes should parse");
        let destinations = parse_urls(destinations).expect("destinations should parse");
        check_redirect(executor, TARGET, &codes, &destinations).await
    }

    #[tokio::test]
    async fn test_accepted_redirect() {
        let executor = FakeExecutor::redirect(301, "https://www.example.com");

        let result = check(&executor, "301", "https://www.example.com")
            .await
            .expect("redirect should be accepted");

        assert_eq!(result.status_code, 301);
        assert_eq!(result.location, "https://www.example.com/");
    }

    #[tokio::test]
    async fn test_unexpected_status_code() {
        let executor = FakeExecutor::redirect(308, "https://www.example.com");

        let err = check(&executor, "301", "https://www.example.com")
            .await
            .expect_err("308 is not accepted");

        assert!(matches!(err, ProbeError::UnexpectedStatus(308)));
        assert_eq!(err.to_string(), "got unexpected status code 308");
    }

    #[tokio::test]
    async fn test_status_is_checked_before_location() {
        let executor = FakeExecutor {
            code: 200,
            location: None,
        };

        let err = check(&executor, "301,302", "https://www.example.com")
            .await
            .expect_err("200 is not accepted");

        assert!(matches!(err, ProbeError::UnexpectedStatus(200)));
    }

    #[tokio::test]
    async fn test_invalid_redirect_target() {
        let executor = FakeExecutor::redirect(301, "https://www.example.com");

        let err = check(&executor, "301", "https://foo.example.com")
            .await
            .expect_err("www is not an accepted destination");

        assert_eq!(
            err.to_string(),
            r#"got invalid redirect target "https://www.example.com/""#
        );
    }

    #[tokio::test]
    async fn test_empty_location_header() {
        let executor = FakeExecutor::redirect(301, "");

        let err = check(&executor, "301", "https://foo.example.com")
            .await
            .expect_err("empty location must fail");

        assert!(matches!(err, ProbeError::LocationHeaderNotFound));
    }

    #[tokio::test]
    async fn test_missing_location_header() {
        let executor = FakeExecutor {
            code: 302,
            location: None,
        };

        let err = check(&executor, "301, 302", "https://foo.example.com")
            .await
            .expect_err("absent location must fail");

        assert!(matches!(err, ProbeError::LocationHeaderNotFound));
        assert_eq!(err.to_string(), "location header not found");
    }

    #[tokio::test]
    async fn test_location_is_normalized_before_lookup() {
        let executor = FakeExecutor::redirect(302, "HTTPS://WWW.Example.COM:443");

        let result = check(&executor, "302", "https://www.example.com/")
            .await
            .expect("equivalent location should be accepted");

        assert_eq!(result.location, "https://www.example.com/");
    }

    #[tokio::test]
    async fn test_relative_location_resolves_against_target() {
        let executor = FakeExecutor::redirect(307, "/landing?from=probe");

        let result = check(&executor, "307", "https://example.com/landing?from=probe")
            .await
            .expect("relative location should resolve");

        assert_eq!(result.location, "https://example.com/landing?from=probe");
    }

    #[tokio::test]
    async fn test_unparsable_location() {
        let executor = FakeExecutor::redirect(301, "https://exa mple.com");

        let err = check(&executor, "301", "https://www.example.com")
            .await
            .expect_err("location with a space in the host cannot parse");

        assert!(matches!(err, ProbeError::ParseLocation(_)));
    }

    #[tokio::test]
    async fn test_malformed_target() {
        let executor = FakeExecutor::redirect(301, "https://www.example.com");
        let codes = parse_codes("301").unwrap();
        let destinations = parse_urls("https://www.example.com").unwrap();

        let err = check_redirect(&executor, "not a url", &codes, &destinations)
            .await
            .expect_err("target cannot be parsed");

        assert!(matches!(err, ProbeError::ConstructRequest(_)));
        assert_eq!(err.to_string(), "constructing request");
    }

    #[tokio::test]
    async fn test_client_does_not_follow_redirect() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(ResponseTemplate::new(301).insert_header("Location", "/new"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/new"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = build_client(Duration::from_secs(5)).unwrap();
        let codes = parse_codes("301").unwrap();
        let destinations = parse_urls(&format!("{}/new", server.uri())).unwrap();

        let result = check_redirect(&client, &format!("{}/old", server.uri()), &codes, &destinations)
            .await
            .expect("first hop should be accepted");

        assert_eq!(result.status_code, 301);
        assert_eq!(result.location, format!("{}/new", server.uri()));
    }

    #[tokio::test]
    async fn test_client_timeout_is_an_execution_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(301)
                    .insert_header("Location", "https://www.example.com")
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = build_client(Duration::from_millis(100)).unwrap();
        let codes = parse_codes("301").unwrap();
        let destinations = parse_urls("https://www.example.com").unwrap();

        let err = check_redirect(&client, &server.uri(), &codes, &destinations)
            .await
            .expect_err("slow response should time out");

        match err {
            ProbeError::ExecuteRequest(source) => assert!(source.is_timeout()),
            other => panic!("expected an execution error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connection_refused_is_an_execution_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let client = build_client(Duration::from_secs(5)).unwrap();
        let codes = parse_codes("301").unwrap();
        let destinations = parse_urls("https://www.example.com").unwrap();

        let err = check_redirect(&client, &format!("http://{address}/"), &codes, &destinations)
            .await
            .expect_err("nothing is listening");

        assert!(matches!(err, ProbeError::ExecuteRequest(_)));
    }
}
