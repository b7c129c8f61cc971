//! schema-bridge CLI entry point.

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use schema_bridge::cli::{read_request, Args, Command};
use schema_bridge::config::AppConfig;
use schema_bridge::errors::{AppError, ErrorPayload};
use schema_bridge::service::BridgeService;

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let text = if compact { serde_json::to_string(value)? } else { serde_json::to_string_pretty(value)? };
    println!("{}", text);
    Ok(())
}

/// Imprime el payload de error y termina con código 1.
fn fail(err: &AppError, compact: bool) -> Result<std::convert::Infallible> {
    log::error!("{}", err);
    print_json(&ErrorPayload::from(err), compact)?;
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging; also captures `log` records from the library crates
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| args.log_filter().into()))
                             .with_writer(std::io::stderr)
                             .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => match fail(&err, args.compact)? {},
    };
    let service = BridgeService::from_config(&config);

    // Operation failures are reported as JSON payloads with a non-zero exit
    let failure: Option<AppError> = match args.command {
        Command::Tables { dataset } => match service.list_tables(&dataset).await {
            Ok(listing) => {
                print_json(&listing, args.compact)?;
                None
            }
            Err(e) => Some(e),
        },
        Command::Schema { dataset, table, project } => {
            match service.describe_table(project.as_deref(), &dataset, &table).await {
                Ok(report) => {
                    print_json(&report, args.compact)?;
                    None
                }
                Err(e) => Some(e),
            }
        }
        Command::Provision { request } => {
            let outcome = match read_request(&request) {
                Ok(request) => service.provision(&request).await,
                Err(e) => Err(e),
            };
            match outcome {
                Ok(report) => {
                    print_json(&report, args.compact)?;
                    if !report.success {
                        std::process::exit(2);
                    }
                    None
                }
                Err(e) => Some(e),
            }
        }
        Command::Status => {
            let status = service.check_status().await;
            print_json(&status, args.compact)?;
            if !status.authenticated {
                std::process::exit(1);
            }
            None
        }
    };

    if let Some(err) = failure {
        fail(&err, args.compact)?;
    }
    Ok(())
}
