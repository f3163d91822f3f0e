use analytics::{best_worst_trades, AnalyticsEngine, AnalyticsError, BestWorst, MetricsSnapshot};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use configuration::{load_config, Settings};
use core_types::{CanonicalField, RawRecordSet};
use database::{connect, run_migrations, TradeStore};
use normalizer::NormalizedDataset;
use reporter::{generate_report, ReportOptions};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Instrument;

mod display;
mod logging;

const MISSING_PNL_MESSAGE: &str =
    "Couldn't find or compute PnL. Please include PnL column or provide entry/exit/quantity.";

/// The main entry point for the TradeTrack analytics application.
#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; it only supplies overrides.
    let _ = dotenvy::dotenv();

    // Parse command-line arguments
    let cli = Cli::parse();

    let settings = match load_config(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Held until the end of main so the log file is flushed.
    let _log_guard = match logging::init(&settings.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error initializing logging: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let run_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("run", %run_id);

    // Execute the appropriate command
    let result = async {
        match cli.command {
            Commands::Analyze(args) => handle_analyze(args, &settings).await,
            Commands::History(args) => handle_history(args, &settings).await,
        }
    }
    .instrument(span)
    .await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Performance analytics and PDF reports for trade logs.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML settings file (defaults to ./tradetrack.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a CSV trade log.
    Analyze(AnalyzeArgs),
    /// Analyze every trade saved in the history database.
    History(HistoryArgs),
}

/// Output options shared by both commands.
#[derive(Parser)]
struct OutputArgs {
    /// Where to write the PDF report (defaults to `report.output`).
    #[arg(long, conflicts_with = "no_pdf")]
    pdf: Option<PathBuf>,

    /// Skip the PDF report.
    #[arg(long)]
    no_pdf: bool,

    /// Number of trades in each of the best and worst tables.
    #[arg(long)]
    top: Option<usize>,

    /// Print the metrics and rankings as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// The CSV trade log to analyze.
    csv: PathBuf,

    #[command(flatten)]
    output: OutputArgs,

    /// Append the trades to the history database.
    #[arg(long)]
    save: bool,
}

#[derive(Parser)]
struct HistoryArgs {
    #[command(flatten)]
    output: OutputArgs,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Everything computed for one trade log.
struct Analysis {
    dataset: NormalizedDataset,
    snapshot: MetricsSnapshot,
    ranking: BestWorst,
}

async fn handle_analyze(args: AnalyzeArgs, settings: &Settings) -> Result<()> {
    tracing::info!(path = %args.csv.display(), "Loading trade log");
    let raw = ingest::load_csv_path(&args.csv)
        .with_context(|| format!("Failed to load {}", args.csv.display()))?;

    let analysis = analyze(raw, &args.output, settings)?;

    if args.save {
        let store = open_store(settings).await?;
        let saved = store
            .save_trades(&analysis.dataset)
            .await
            .context("Failed to save trades")?;
        if !args.output.json {
            println!("Saved {} trades to history.", saved);
        }
    }

    present(&analysis, &args.output, settings)
}

async fn handle_history(args: HistoryArgs, settings: &Settings) -> Result<()> {
    let store = open_store(settings).await?;
    let raw = store.load_trades().await.context("Failed to load trade history")?;
    tracing::info!(trades = raw.len(), "Loaded trade history");

    if raw.is_empty() {
        const HINT: &str = "No trades saved yet. Use `analyze <CSV> --save` to add some.";
        if args.output.json {
            eprintln!("{}", HINT);
            println!("{}", serde_json::to_string_pretty(&json_document(None))?);
        } else {
            println!("{}", HINT);
        }
        return Ok(());
    }

    let analysis = analyze(raw, &args.output, settings)?;
    present(&analysis, &args.output, settings)
}

async fn open_store(settings: &Settings) -> Result<TradeStore> {
    let pool = connect(&settings.database.url, settings.database.max_connections)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool).await.context("Failed to run migrations")?;
    Ok(TradeStore::new(pool))
}

/// Normalizes the raw records, computes the metrics and ranks the trades.
fn analyze(raw: RawRecordSet, output: &OutputArgs, settings: &Settings) -> Result<Analysis> {
    let dataset = normalizer::process(raw).context("Failed to normalize trade log")?;

    let snapshot = match AnalyticsEngine::new().calculate(&dataset) {
        Ok(snapshot) => snapshot,
        Err(AnalyticsError::MissingRequiredField(CanonicalField::Pnl)) => {
            anyhow::bail!(MISSING_PNL_MESSAGE)
        }
        Err(e) => return Err(e.into()),
    };

    let top_n = output.top.unwrap_or(settings.analysis.top_n);
    let ranking = best_worst_trades(&dataset, top_n);

    Ok(Analysis {
        dataset,
        snapshot,
        ranking,
    })
}

/// The `--json` document. With no analysis every section is empty and
/// `metrics` is null.
fn json_document(analysis: Option<&Analysis>) -> serde_json::Value {
    match analysis {
        Some(analysis) => serde_json::json!({
            "metrics": analysis.snapshot,
            "resolution": analysis.dataset.resolution(),
            "best_trades": analysis.ranking.best,
            "worst_trades": analysis.ranking.worst,
        }),
        None => serde_json::json!({
            "metrics": null,
            "resolution": {},
            "best_trades": [],
            "worst_trades": [],
        }),
    }
}

/// Prints the results and writes the PDF unless disabled.
fn present(analysis: &Analysis, output: &OutputArgs, settings: &Settings) -> Result<()> {
    if output.json {
        println!("{}", serde_json::to_string_pretty(&json_document(Some(analysis)))?);
    } else {
        println!("{}", display::resolution_table(analysis.dataset.resolution()));
        println!("{}", display::kpi_table(&analysis.snapshot));
        println!("Best trades");
        println!("{}", display::trades_table(&analysis.ranking.best));
        println!("Worst trades");
        println!("{}", display::trades_table(&analysis.ranking.worst));
    }

    if output.no_pdf {
        return Ok(());
    }
    let path = output
        .pdf
        .clone()
        .unwrap_or_else(|| PathBuf::from(&settings.report.output));
    write_pdf(analysis, settings, &path)?;
    if !output.json {
        println!("PDF report written to {}", path.display());
    }
    Ok(())
}

fn write_pdf(analysis: &Analysis, settings: &Settings, path: &Path) -> Result<()> {
    let options = ReportOptions {
        title: settings.report.title.clone(),
        chart_size: settings.chart_size(),
        histogram_bins: settings.analysis.histogram_bins,
    };
    let bytes = generate_report(&analysis.dataset, &analysis.snapshot, &options)
        .context("Failed to generate PDF report")?;
    std::fs::write(path, bytes)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    tracing::info!(path = %path.display(), "PDF report written");
    Ok(())
}
