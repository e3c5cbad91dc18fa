/// Outcome of a redirect probe that passed every gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectResult {
    pub status_code: u16,
    pub location: String,
}

impl std::fmt::Display for RedirectResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "code={} location={:?}", self.status_code, self.location)
    }
}
