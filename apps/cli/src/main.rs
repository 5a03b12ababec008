//! # BuildMart Entry Point
//!
//! ```text
//! buildmart [--json] [--config PATH] <command>
//!
//!   products [--category NAME]
//!   product <ID>
//!   quote <ID> [-q N] [--address A] [--pincode P]
//!   order <ID> [-q N] --name --phone --address --pincode [--no-gst-invoice]
//!   payment-confirmation <ID> [-q N] --name --phone --address --pincode
//!   admin --password P <show | set-price | set-gst | set-vehicle | set-contact | reset>
//! ```
//!
//! Errors go to stderr as `[CODE] message` (or JSON with `--json`) and the
//! process exits non-zero.

use clap::Parser;
use std::process::ExitCode;

use buildmart_cli::cli::Cli;
use buildmart_cli::{init_tracing, run};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let json = cli.json;

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if json {
                match serde_json::to_string(&err) {
                    Ok(body) => eprintln!("{}", body),
                    Err(_) => eprintln!("{}", err),
                }
            } else {
                eprintln!("{}", err);
            }
            ExitCode::FAILURE
        }
    }
}
