// System status display: configuration and backend reachability.

use anyhow::Result;
use colored::Colorize;
use tracing::warn;

use crate::config::Config;
use crate::fetch::HttpAnalysisBackend;

/// Display configuration and check the analysis backend.
pub async fn show(config: &Config, backend: &HttpAnalysisBackend) -> Result<()> {
    println!("Backend: {}{}", backend.base_url(), config.analyze_path);

    match backend.health().await {
        Ok(health) => {
            println!("  Health: {}", health.status.green());
            match health.api_key_configured {
                Some(true) => println!("  YouTube API key: configured"),
                Some(false) => {
                    println!("  YouTube API key: {}", "missing".yellow());
                    println!("    Set YOUTUBE_API_KEY in the backend's .env file");
                }
                None => {}
            }
        }
        Err(e) => {
            warn!(error = %e, "Backend health check failed");
            println!("  Health: {} ({e})", "unreachable".red());
            println!("    Start the analysis backend or set CINDER_API_BASE");
        }
    }

    match config.request_timeout {
        Some(timeout) => println!("Request timeout: {}s", timeout.as_secs()),
        None => println!("Request timeout: none"),
    }
    println!("Dashboard: http://{}:{}", config.bind, config.port);
    println!("Report directory: {}", config.report_dir.display());

    Ok(())
}
