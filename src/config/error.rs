use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Problems found while assembling the configuration. All of them abort before any request is made.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("parsing {value:?} as an int")]
    ParseCode {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("parsing {value:?} as a url")]
    ParseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("missing required option --{0}")]
    MissingOption(&'static str),

    #[error("reading config file {}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}", .path.display())]
    InvalidFile {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("timeout must be at least one second")]
    ZeroTimeout,

    #[error("building http client")]
    BuildClient(#[source] reqwest::Error),

    #[error("parsing codes")]
    Codes(#[source] Box<ConfigError>),

    #[error("parsing expected")]
    Expected(#[source] Box<ConfigError>),
}
