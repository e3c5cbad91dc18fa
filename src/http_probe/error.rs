use thiserror::Error;

/// Reasons a redirect probe can fail once configuration has been accepted.
///
/// Every variant maps to a CRITICAL plugin result. `LocationHeaderNotFound` is kept as a
/// unit variant so callers can branch on it with `matches!` instead of comparing messages.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("constructing request")]
    ConstructRequest(#[source] url::ParseError),

    #[error("executing request")]
    ExecuteRequest(#[source] reqwest::Error),

    #[error("got unexpected status code {0}")]
    UnexpectedStatus(u16),

    #[error("location header not found")]
    LocationHeaderNotFound,

    #[error("parsing location header")]
    ParseLocation(#[source] url::ParseError),

    /// Carries the normalized location, not the raw header value.
    #[error("got invalid redirect target {0:?}")]
    InvalidRedirectTarget(String),
}
