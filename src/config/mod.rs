//! Configuration module for the records backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

/// Default request body limit: large enough for a photo.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Directory uploaded images are written to and served from
    pub upload_dir: PathBuf,
    /// Optional directory of static site files served for unmatched paths
    pub public_dir: Option<PathBuf>,
    /// Maximum accepted request body size in bytes
    pub max_upload_bytes: usize,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AddrParseError> {
        dotenvy::dotenv().ok();

        let bind_addr = env::var("SCHOOL_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:5000".to_string())
            .parse()?;

        let upload_dir = env::var("SCHOOL_UPLOAD_DIR")
            .unwrap_or_else(|_| "./uploads".to_string())
            .into();

        let public_dir = env::var("SCHOOL_PUBLIC_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let max_upload_bytes = env::var("SCHOOL_MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        let log_level = env::var("SCHOOL_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_json = env::var("SCHOOL_LOG_FORMAT")
            .map(|s| s.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Ok(Self {
            bind_addr,
            upload_dir,
            public_dir,
            max_upload_bytes,
            log_level,
            log_json,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 6] = [
        "SCHOOL_BIND_ADDR",
        "SCHOOL_UPLOAD_DIR",
        "SCHOOL_PUBLIC_DIR",
        "SCHOOL_MAX_UPLOAD_BYTES",
        "SCHOOL_LOG_LEVEL",
        "SCHOOL_LOG_FORMAT",
    ];

    // One test touches the environment so parallel tests cannot race on it.
    #[test]
    fn test_config_from_env() {
        for var in VARS {
            env::remove_var(var);
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:5000");
        assert_eq!(config.upload_dir, PathBuf::from("./uploads"));
        assert!(config.public_dir.is_none());
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(config.log_level, "info");
        assert!(!config.log_json);

        env::set_var("SCHOOL_BIND_ADDR", "0.0.0.0:8080");
        env::set_var("SCHOOL_PUBLIC_DIR", "./public");
        env::set_var("SCHOOL_MAX_UPLOAD_BYTES", "not-a-number");
        env::set_var("SCHOOL_LOG_FORMAT", "JSON");

        let config = Config::from_env().unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.public_dir, Some(PathBuf::from("./public")));
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert!(config.log_json);

        env::set_var("SCHOOL_BIND_ADDR", "localhost-ish");
        assert!(Config::from_env().is_err());

        for var in VARS {
            env::remove_var(var);
        }
    }
}
