use std::{io::Read, path::Path, path::PathBuf, sync::Arc};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::{
    load_settings, HttpReportBackend, ReportBackend, ReportController, ResultPanel,
};
use shared::catalog::{default_report_type, REPORT_TYPES};
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Submit free-text input to the report backend and print the generated report")]
struct Args {
    /// Backend base URL; overrides report.toml and REPORT_API_URL.
    #[arg(long)]
    server_url: Option<String>,
    /// Report type label passed through to the backend unmodified.
    #[arg(long)]
    report_type: Option<String>,
    /// Read input text from this file instead of stdin.
    #[arg(long)]
    input: Option<PathBuf>,
    /// Copy a successful report to the system clipboard.
    #[arg(long)]
    copy: bool,
    /// List the selectable report types and exit.
    #[arg(long)]
    list_types: bool,
    /// Check that the backend is reachable and exit.
    #[arg(long)]
    ping: bool,
}

fn read_input_text(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file '{}'", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read input text from stdin")?;
            Ok(buffer)
        }
    }
}

fn copy_to_clipboard(report: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("failed to open system clipboard")?;
    clipboard
        .set_text(report.to_string())
        .context("failed to copy report to clipboard")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    if args.list_types {
        for report_type in REPORT_TYPES {
            println!("{report_type}");
        }
        return Ok(());
    }

    let mut settings = load_settings();
    if let Some(server_url) = args.server_url {
        settings.api_base_url = server_url;
    }
    let backend = Arc::new(HttpReportBackend::new(settings.api_base_url));

    if args.ping {
        let message = backend
            .ping()
            .await
            .map_err(|err| anyhow!("backend unreachable: {err}"))?;
        println!("{message}");
        return Ok(());
    }

    let input_text = read_input_text(args.input.as_deref())?;
    let report_type = args
        .report_type
        .unwrap_or_else(|| default_report_type().to_string());
    info!(%report_type, "submitting report request");

    let controller = ReportController::new(backend);
    controller.set_input_text(input_text).await;
    controller.set_report_type(report_type).await;

    if let Err(err) = controller.submit_report().await {
        eprintln!("Error: {err}");
        std::process::exit(2);
    }

    match controller.state().await.projection().panel {
        Some(ResultPanel::Report(report)) => {
            // Verbatim output: embedded newlines and whitespace intact.
            print!("{report}");
            if args.copy {
                copy_to_clipboard(&report)?;
                eprintln!("Report copied to clipboard.");
            }
            Ok(())
        }
        Some(ResultPanel::Error(message)) => {
            eprintln!("Error: {message}");
            std::process::exit(1);
        }
        None => Err(anyhow!("submission did not produce an outcome")),
    }
}
