use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, error::ErrorKind};

/// Long options that are also accepted with a single dash, e.g. `-url https://example.com`
/// or `-codes=301`, so existing command definitions keep working.
const SINGLE_DASH_LONG: &[&str] = &["url", "expected", "codes", "timeout", "config", "verbose"];

#[derive(Debug, Parser)]
#[command(name = "check_http_redirect", version, about, long_about = None)]
pub struct Cli {
    /// The address to request.
    #[arg(short, long, env = "REDIRECT_CHECK_URL")]
    pub url: Option<String>,

    /// A comma delimited list of acceptable URL targets to redirect to.
    #[arg(short, long, env = "REDIRECT_CHECK_EXPECTED", value_name = "URLS")]
    pub expected: Option<String>,

    /// A comma delimited list of acceptable HTTP status codes.
    #[arg(short, long, env = "REDIRECT_CHECK_CODES")]
    pub codes: Option<String>,

    /// Request deadline in seconds [default: 10].
    #[arg(
        short,
        long,
        env = "REDIRECT_CHECK_TIMEOUT",
        value_name = "SECONDS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: Option<u64>,

    /// Path to a YAML file providing any of the options above.
    #[arg(long, env = "CONFIG_FILE", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parses `args` after rewriting single dash long options to their `--` form.
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Cli::try_parse_from(args.into_iter().map(Into::into).map(to_long_option))
    }
}

fn to_long_option(arg: OsString) -> OsString {
    let Some(text) = arg.to_str() else {
        return arg;
    };
    let Some(rest) = text.strip_prefix('-') else {
        return arg;
    };
    if rest.starts_with('-') {
        return arg;
    }
    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    if SINGLE_DASH_LONG.contains(&name) {
        format!("-{text}").into()
    } else {
        arg
    }
}

/// The message for an UNKNOWN status line, or `None` when clap only printed help or version.
/// Usage errors must not use clap's exit code 2, which monitoring reads as CRITICAL.
pub fn usage_error_message(err: &clap::Error) -> Option<String> {
    if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return None;
    }
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or_default();
    Some(first_line.trim_start_matches("error: ").to_string())
}
