//! CLI entry point for the airfare insights tool.
//!
//! Provides subcommands for serving the report web UI and for running the
//! reporting pipeline once from the command line.

use airfare_insights::openai::OpenAiGenerator;
use airfare_insights::output::{append_records, print_json};
use airfare_insights::report::{filtered_records, run_report, ReportQuery};
use airfare_insights::server::{build_app, AppState};
use airfare_insights::source::{FareSource, SampleSource};
use airfare_insights::summarize::Summarizer;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

#[derive(Parser)]
#[command(name = "airfare_insights")]
#[command(about = "A web-served airline market demand report", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the report web UI
    Serve {
        /// Address to bind
        #[arg(short, long, default_value = "127.0.0.1:5000")]
        bind: String,
    },
    /// Run the reporting pipeline once and log the result
    Report {
        /// Inclusive start of the date range (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<String>,

        /// Inclusive end of the date range (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<String>,

        /// Origin name substring, matched case-insensitively
        #[arg(short, long)]
        origin: Option<String>,

        /// Destination name substring, matched case-insensitively
        #[arg(short, long)]
        destination: Option<String>,

        /// CSV file to append the filtered rows to
        #[arg(long)]
        output: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/airfare_insights.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("airfare_insights.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
    if api_key.is_empty() {
        warn!("OPENAI_API_KEY not set; insight generation will degrade to a placeholder");
    }
    let model = std::env::var("OPENAI_MODEL").ok();

    let generator = OpenAiGenerator::new(api_key, model)?;
    let summarizer = Arc::new(Summarizer::new(Arc::new(generator)));
    let source: Arc<dyn FareSource> = Arc::new(SampleSource);

    match cli.command {
        Commands::Serve { bind } => {
            let app = build_app(AppState { source, summarizer });
            let listener = tokio::net::TcpListener::bind(&bind).await?;
            info!(addr = %bind, "Serving airline demand report");
            axum::serve(listener, app).await?;
        }
        Commands::Report {
            start_date,
            end_date,
            origin,
            destination,
            output,
        } => {
            let query = ReportQuery {
                start_date,
                end_date,
                origin,
                destination,
            };

            let report = run_report(source.as_ref(), &summarizer, &query).await;
            print_json(&report)?;

            if let Some(path) = output {
                let rows = filtered_records(source.as_ref(), &query)
                    .await
                    .unwrap_or_default();
                append_records(&path, &rows)?;
                info!(path = %path, rows = rows.len(), "Filtered rows appended");
            }
        }
    }

    Ok(())
}
