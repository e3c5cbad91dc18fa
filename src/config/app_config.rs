use std::collections::HashSet;
use std::time::Duration;

use reqwest::{Client, redirect::Policy};

use super::cli::Cli;
use super::error::ConfigError;
use super::file_config::{self, DelimitedList, FileConfig};
use super::parse::{parse_codes, parse_urls};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug)]
pub struct AppConfig {
    pub url: String,
    pub accepted_codes: HashSet<u16>,
    pub accepted_destinations: HashSet<String>,
    pub timeout: Duration,
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::MissingOption(name))
}

/// Load the check configuration from the command line and the optional YAML file.
/// Values given on the command line (or through their environment variables) override the file.
/// `codes` and `expected` are parsed and validated here, so any problem surfaces before a
/// request is made. The target URL is passed through untouched.
pub fn load_config(cli: &Cli) -> Result<AppConfig, ConfigError> {
    let file = match &cli.config {
        Some(path) => file_config::load_file(path)?,
        None => FileConfig::default(),
    };

    let codes = required(
        cli.codes
            .clone()
            .or_else(|| file.codes.as_ref().map(DelimitedList::joined)),
        "codes",
    )?;
    let accepted_codes = parse_codes(&codes).map_err(|e| ConfigError::Codes(Box::new(e)))?;

    let expected = required(
        cli.expected
            .clone()
            .or_else(|| file.expected.as_ref().map(DelimitedList::joined)),
        "expected",
    )?;
    let accepted_destinations =
        parse_urls(&expected).map_err(|e| ConfigError::Expected(Box::new(e)))?;

    let url = required(cli.url.clone().or(file.url), "url")?;

    let timeout = match cli.timeout.or(file.timeout_seconds) {
        Some(0) => return Err(ConfigError::ZeroTimeout),
        Some(seconds) => Duration::from_secs(seconds),
        None => DEFAULT_TIMEOUT,
    };

    log::info!(
        "Checking {url} (codes: {accepted_codes:?}, destinations: {accepted_destinations:?}, timeout: {timeout:?})"
    );

    Ok(AppConfig {
        url,
        accepted_codes,
        accepted_destinations,
        timeout,
    })
}

/// Setup an HTTP client that never follows redirects.
/// The first response is handed back as is, so its status and `Location` can be inspected.
pub fn build_client(timeout: Duration) -> Result<Client, ConfigError> {
    Client::builder()
        .redirect(Policy::none())
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .use_rustls_tls()
        .build()
        .map_err(ConfigError::BuildClient)
}
