//! Argumentos de línea de comandos.
use crate::errors::AppError;
use bridge_core::ProvisioningRequest;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Traduce esquemas de tablas a JSON Schema y los aprovisiona en Blind.
#[derive(Parser, Debug)]
#[command(name = "schema-bridge")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Compact JSON output instead of pretty-printed
    #[arg(long, global = true)]
    pub compact: bool,

    /// Enable verbose output (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the tables of a source dataset
    Tables {
        #[arg(value_name = "DATASET")]
        dataset: String,
    },
    /// Show a table schema and its JSON Schema translation
    Schema {
        #[arg(value_name = "DATASET")]
        dataset: String,
        #[arg(value_name = "TABLE")]
        table: String,
        /// Source project (defaults to GOOGLE_CLOUD_PROJECT_ID)
        #[arg(long)]
        project: Option<String>,
    },
    /// Provision a schema and sample rows from a JSON request ("-" reads stdin)
    Provision {
        #[arg(value_name = "REQUEST_FILE", default_value = "-")]
        request: PathBuf,
    },
    /// Check Blind CLI authentication
    Status,
}

impl Args {
    /// Filtro de log según la cantidad de `-v`.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Lee la petición de `path` ("-" es stdin).
pub fn read_request(path: &Path) -> Result<ProvisioningRequest, AppError> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(ProvisioningRequest::from_json(&text)?)
}
