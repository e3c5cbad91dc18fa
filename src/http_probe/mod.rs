pub mod error;
pub mod executor;
pub mod probe;
pub mod result;

pub mod prelude {
    pub use super::error::ProbeError;
    pub use super::executor::HttpExecutor;
    pub use super::probe::{canonical_url, check_redirect};
    pub use super::result::RedirectResult;
}
