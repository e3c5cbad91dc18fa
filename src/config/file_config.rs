use std::fmt;
use std::path::Path;

use serde::Deserialize;

use super::error::ConfigError;

/// Optional YAML configuration for the redirect check.
/// Every key can also be given on the command line, which takes precedence over the file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// The URL to request.
    pub url: Option<String>,

    /// Acceptable redirect destinations, either a comma delimited string or a list.
    pub expected: Option<DelimitedList>,

    /// Acceptable HTTP status codes, either a comma delimited string or a list.
    pub codes: Option<DelimitedList>,

    /// Request deadline in seconds.
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(u64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

/// A YAML value that is either a single entry or a sequence of entries.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DelimitedList {
    One(Scalar),
    Many(Vec<Scalar>),
}

impl DelimitedList {
    /// Joins the entries with commas so they go through the same parsers as the CLI flags.
    pub fn joined(&self) -> String {
        match self {
            DelimitedList::One(value) => value.to_string(),
            DelimitedList::Many(values) => values
                .iter()
                .map(Scalar::to_string)
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

pub fn load_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let config_str = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    serde_yaml::from_str(&config_str).map_err(|source| ConfigError::InvalidFile {
        path: path.to_path_buf(),
        source,
    })
}
