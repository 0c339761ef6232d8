//! Configuration module

use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

/// Default artifact filename, looked up relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "malicious_url_rfc_model.json";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: IpAddr,

    /// Server port
    pub port: u16,

    /// Classifier artifact (.json forest or .onnx)
    pub model_path: PathBuf,

    /// Malicious probability cutoff
    pub malicious_threshold: f64,

    /// Request body limit for CSV uploads
    pub max_upload_bytes: usize,

    /// Show confidence percentages on the pages
    pub show_confidence: bool,

    pub log_format: LogFormat,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup (environment, test map, ...)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: lookup("HOST")
                .and_then(|h| h.parse().ok())
                .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),

            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8501),

            model_path: lookup("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH)),

            malicious_threshold: lookup("MALICIOUS_THRESHOLD")
                .and_then(|t| t.parse().ok())
                .unwrap_or(0.5),

            max_upload_bytes: lookup("MAX_UPLOAD_MB")
                .and_then(|m| m.parse::<usize>().ok())
                .unwrap_or(10)
                * 1024
                * 1024,

            show_confidence: lookup("SHOW_CONFIDENCE")
                .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off"))
                .unwrap_or(true),

            log_format: match lookup("LOG_FORMAT").as_deref() {
                Some("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },

            environment: lookup("ENVIRONMENT")
                .unwrap_or_else(|| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
