use log::LevelFilter;

pub mod config;
use config::{
    app_config::{build_client, load_config},
    cli::{Cli, usage_error_message},
};
pub mod http_probe;
use http_probe::prelude::*;
pub mod nagios;
use nagios::{Status, report};

fn init_logging(verbose: bool) {
    let mut builder = env_logger::builder();
    builder.format_timestamp_secs();
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    } else {
        builder
            .filter_level(LevelFilter::Off)
            .filter_module("check_http_redirect", LevelFilter::Warn);
    }
    builder.parse_default_env();
    builder.init();
}

fn parse_cli() -> Cli {
    match Cli::try_parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(err) => match usage_error_message(&err) {
            Some(message) => nagios::exit(Status::Unknown, &message),
            None => err.exit(),
        },
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = parse_cli();
    init_logging(cli.verbose);

    let config = load_config(&cli).unwrap_or_else(|e| nagios::exit(Status::Unknown, &report(&e)));
    let client =
        build_client(config.timeout).unwrap_or_else(|e| nagios::exit(Status::Unknown, &report(&e)));

    match check_redirect(
        &client,
        &config.url,
        &config.accepted_codes,
        &config.accepted_destinations,
    )
    .await
    {
        Ok(result) => nagios::exit(Status::Ok, &result.to_string()),
        Err(e) => {
            log::warn!("Redirect check for {} failed: {e:?}", config.url);
            nagios::exit(Status::Critical, &report(&e))
        }
    }
}
