//! qd2 - Deploy Quditto components onto an existing Kubernetes cluster with Helm

use std::process::ExitCode;

use clap::Parser;

use qd2_cli::cli::Cli;
use qd2_cli::commands::exit_status_for;
use qd2_cli::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, !cli.no_color);

    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(exit_status_for(&e))
        }
    }
}
