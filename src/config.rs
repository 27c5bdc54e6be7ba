use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

/// Default analysis backend (the Flask service's development address).
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000";
/// Default path of the analysis endpoint on the backend.
pub const DEFAULT_ANALYZE_PATH: &str = "/api/comments";

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Nothing
/// here is secret; the backend owns the YouTube API key.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the analysis backend.
    pub api_base: String,
    /// Path of the analysis endpoint, appended to `api_base`.
    pub analyze_path: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
    /// Address the dashboard binds to.
    pub bind: String,
    pub port: u16,
    /// Where `cinder analyze --report` writes PDFs.
    pub report_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every value has a default, so an empty environment yields a working
    /// local setup.
    pub fn load() -> Result<Self> {
        let request_timeout = match env::var("CINDER_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    anyhow::anyhow!("CINDER_REQUEST_TIMEOUT_SECS must be a whole number, got {raw:?}")
                })?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            Err(_) => Some(Duration::from_secs(60)),
        };

        let port = match env::var("CINDER_PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("CINDER_PORT must be a port number, got {raw:?}"))?,
            Err(_) => 8080,
        };

        let report_dir = env::var("CINDER_REPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_report_dir());

        Ok(Self {
            api_base: env::var("CINDER_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            analyze_path: env::var("CINDER_ANALYZE_PATH")
                .unwrap_or_else(|_| DEFAULT_ANALYZE_PATH.to_string()),
            request_timeout,
            bind: env::var("CINDER_BIND").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port,
            report_dir,
        })
    }

    /// Check that the backend base URL is an http(s) URL.
    /// Call this before building the HTTP client.
    pub fn require_api_base(&self) -> Result<()> {
        let base = self.api_base.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            anyhow::bail!(
                "CINDER_API_BASE must be an http:// or https:// URL, got {:?}.\n\
                 Set it in your .env file, e.g. CINDER_API_BASE={DEFAULT_API_BASE}",
                self.api_base
            );
        }
        Ok(())
    }
}

/// The platform download directory when there is one, else `./output`.
pub fn default_report_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("output"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_base: &str) -> Config {
        Config {
            api_base: api_base.to_string(),
            analyze_path: DEFAULT_ANALYZE_PATH.to_string(),
            request_timeout: None,
            bind: "127.0.0.1".to_string(),
            port: 8080,
            report_dir: PathBuf::from("output"),
        }
    }

    #[test]
    fn http_base_is_accepted() {
        assert!(config("http://127.0.0.1:5000").require_api_base().is_ok());
        assert!(config("https://triage.example.com").require_api_base().is_ok());
    }

    #[test]
    fn non_http_base_is_rejected() {
        let err = config("127.0.0.1:5000").require_api_base().unwrap_err();
        assert!(err.to_string().contains("CINDER_API_BASE"));
    }
}
