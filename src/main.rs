use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use tracing::{debug, info, warn};

use draft_analyzer::backend::{build_http_client, HttpBackend};
use draft_analyzer::charts::ChartBundle;
use draft_analyzer::interpret::HttpInterpreter;
use draft_analyzer::{AnalysisRequest, AnalyzerSession, Category, Settings};

/// Draft Analyzer - sentiment, trends, headline score and related articles for a draft
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Article headline
    #[arg(long)]
    heading: String,

    /// technology | politics | marketing | economy | philosophy
    #[arg(long)]
    category: Category,

    /// File holding the draft text (reads stdin when omitted)
    #[arg(short, long)]
    text_file: Option<PathBuf>,

    /// Path to config file (overrides DRAFT_ANALYZER_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Analysis backend base URL (overrides config)
    #[arg(long)]
    backend_url: Option<String>,

    /// Sentiment prediction endpoint (overrides config)
    #[arg(long)]
    prediction_url: Option<String>,

    /// Include chart datasets in the output
    #[arg(long)]
    charts: bool,

    /// Also write chart.*.json files into this directory
    #[arg(long)]
    charts_dir: Option<PathBuf>,
}

fn read_text(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p)
            .with_context(|| format!("Reading draft text from {}", p.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Reading draft text from stdin")?;
            Ok(buf)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the JSON result.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();

    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref()).context("Loading configuration")?;
    if let Some(url) = args.backend_url {
        settings.backend_url = url;
    }
    if let Some(url) = args.prediction_url {
        settings.prediction_url = url;
    }
    settings.validate().context("Validating configuration")?;
    debug!(
        "Using backend={}, prediction={}",
        settings.backend_url, settings.prediction_url
    );

    let text = read_text(args.text_file.as_ref())?;
    let request = AnalysisRequest::new(text.trim(), args.heading.trim(), args.category);

    let client = build_http_client(&settings).context("Building HTTP client")?;
    let interpreter = HttpInterpreter::new(client.clone(), settings.prediction_endpoint()?);
    let backend = HttpBackend::from_settings(client, &settings)?;
    let session = AnalyzerSession::new(Arc::new(interpreter), Arc::new(backend));

    info!("Starting draft analysis - category={}", request.category);
    let report = session
        .analyze(request)
        .await
        .context("Draft is not ready for analysis")?;

    for failure in &report.failures {
        warn!("Section unavailable - {}", failure);
    }

    let charts = ChartBundle::from_view(&report.view);
    if let Some(dir) = &args.charts_dir {
        let written = charts.write_all(dir)?;
        info!("Wrote {} chart files to {}", written.len(), dir.display());
    }

    let output = if args.charts {
        json!({ "view": report.view, "charts": charts })
    } else {
        serde_json::to_value(&report.view)?
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
