use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::{Local, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use cinder::config::Config;
use cinder::fetch::{FetchController, HttpAnalysisBackend};
use cinder::filter::FilterSelector;
use cinder::report::{build_report, ReportInput};
use cinder::state::AppStore;

/// Cinder: toxic comment triage for YouTube videos.
///
/// Sends a video URL to the analysis backend, shows which comments were
/// flagged and how severely, and produces a PDF evidence report.
#[derive(Parser)]
#[command(name = "cinder", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web dashboard
    Serve {
        /// Port to listen on (overrides CINDER_PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind (overrides CINDER_BIND)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Analyze one video and print the results
    Analyze {
        /// YouTube video URL
        url: String,

        /// Which comments to list
        #[arg(long, value_enum, default_value = "all")]
        filter: FilterArg,

        /// Also write the PDF report
        #[arg(long)]
        report: bool,

        /// Directory for the report (overrides CINDER_REPORT_DIR)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Show configuration and check that the backend is reachable
    Status,
}

#[derive(Clone, Copy, ValueEnum)]
enum FilterArg {
    All,
    Safe,
    Flagged,
    High,
}

impl From<FilterArg> for FilterSelector {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => FilterSelector::All,
            FilterArg::Safe => FilterSelector::Safe,
            FilterArg::Flagged => FilterSelector::Flagged,
            FilterArg::High => FilterSelector::High,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cinder=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, bind } => {
            let mut config = Config::load()?;
            config.require_api_base()?;
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(bind) = bind {
                config.bind = bind;
            }

            let controller = build_controller(&config)?;
            info!(backend = %config.api_base, "Starting dashboard");
            cinder::web::run_server(config, controller).await?;
        }

        Commands::Analyze {
            url,
            filter,
            report,
            out_dir,
        } => {
            let config = Config::load()?;
            config.require_api_base()?;
            let controller = build_controller(&config)?;

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("  {spinner} {msg}")
                    .expect("valid template"),
            );
            spinner.set_message("Analyzing comments...");
            spinner.enable_steady_tick(Duration::from_millis(100));

            let result = controller.submit(&url).await;
            spinner.finish_and_clear();

            let snapshot = match result {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    println!("{} {}", "Error:".red().bold(), e);
                    std::process::exit(1);
                }
            };

            if let Some(video) = &snapshot.video {
                cinder::output::terminal::display_video(video);
            }
            if let Some(analysis) = &snapshot.analysis {
                cinder::output::terminal::display_dashboard(analysis);
            }

            let selector = FilterSelector::from(filter);
            let comments = cinder::filter::derive(&snapshot, selector);
            cinder::output::terminal::display_comments(&comments, selector, Utc::now());

            if report {
                let input = ReportInput::from_snapshot(Some(&snapshot));
                let report = build_report(&input, Local::now().date_naive());
                let dir = out_dir.unwrap_or_else(|| config.report_dir.clone());
                let path = cinder::output::write_report(&report, &dir)?;
                println!(
                    "\n{}",
                    format!("PDF report saved to: {}", path.display()).bold()
                );
            }
        }

        Commands::Status => {
            let config = Config::load()?;
            config.require_api_base()?;
            let backend = HttpAnalysisBackend::new(
                &config.api_base,
                &config.analyze_path,
                config.request_timeout,
            )?;
            cinder::status::show(&config, &backend).await?;
        }
    }

    Ok(())
}

/// Build the fetch controller over the HTTP backend and a fresh store.
fn build_controller(config: &Config) -> Result<Arc<FetchController>> {
    let backend = HttpAnalysisBackend::new(
        &config.api_base,
        &config.analyze_path,
        config.request_timeout,
    )?;
    let store = Arc::new(AppStore::new());
    Ok(Arc::new(FetchController::new(Arc::new(backend), store)))
}
