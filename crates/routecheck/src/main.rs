mod check;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::check::Format;

#[derive(Parser)]
#[command(name = "routecheck", version)]
#[command(about = "Checks that route pages declare the params their file paths encode", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check every route file in a project
    Check {
        /// Project directory (defaults to the current directory)
        project: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
    },
    /// Run the language server over stdio
    Lsp,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let result = match cli.command {
        Command::Check { project, format } => check::run(project, format),
        Command::Lsp => run_lsp(),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("[routecheck] {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "routecheck=debug,route_core=debug,route_swc=debug,route_lsp=debug"
    } else {
        "routecheck=info,route_lsp=info"
    };

    // stdout carries reports and the LSP transport, so logs go to stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run_lsp() -> Result<ExitCode> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to initialize lsp runtime")?;
    runtime.block_on(route_lsp::run_stdio())?;
    Ok(ExitCode::SUCCESS)
}
