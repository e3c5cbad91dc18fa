use std::collections::HashSet;

use url::Url;

use super::error::ConfigError;
use crate::http_probe::prelude::canonical_url;

/// Parses a comma delimited list of status codes such as `"301, 302"`.
/// A single bad entry rejects the whole list.
pub fn parse_codes(codes: &str) -> Result<HashSet<u16>, ConfigError> {
    codes
        .split(',')
        .map(str::trim)
        .map(|piece| {
            piece.parse::<u16>().map_err(|source| ConfigError::ParseCode {
                value: piece.to_string(),
                source,
            })
        })
        .collect()
}

/// Parses a comma delimited list of absolute URLs into their canonical string form.
/// A single bad entry rejects the whole list.
pub fn parse_urls(urls: &str) -> Result<HashSet<String>, ConfigError> {
    urls.split(',')
        .map(str::trim)
        .map(|piece| {
            Url::parse(piece)
                .map(canonical_url)
                .map_err(|source| ConfigError::ParseUrl {
                    value: piece.to_string(),
                    source,
                })
        })
        .collect()
}
