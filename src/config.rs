//! Configuration module
//!
//! Loads the immutable server configuration once at startup: an optional
//! `config.toml` layered over built-in defaults. No environment variables
//! or CLI flags are consumed; with no file present the defaults alone are
//! enough to start serving.

use serde::Deserialize;
use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub files: FilesConfig,
    pub logging: LoggingConfig,
}

/// Listener configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Static file serving configuration
#[derive(Debug, Deserialize, Clone)]
pub struct FilesConfig {
    /// Served root directory. Defaults to the directory containing the
    /// executable when unset.
    pub root: Option<String>,
    /// Index file candidates tried for directory requests, in order.
    pub index_files: Vec<String>,
    /// Generate an HTML listing for directories without an index file.
    pub directory_listing: bool,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log format: `common`, `combined`, or `json`.
    pub access_log_format: String,
    /// Access log file path (stdout if not set)
    pub access_log_file: Option<String>,
    /// Error log file path (stderr if not set)
    pub error_log_file: Option<String>,
}

impl Config {
    /// Load configuration from `config.toml` in the working directory,
    /// falling back to defaults when the file is absent.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the specified file path (without extension).
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3001)?
            .set_default(
                "files.index_files",
                vec!["index.html".to_string(), "index.htm".to_string()],
            )?
            .set_default("files.directory_listing", true)?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "common")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

/// Shared application state: the configuration plus the canonicalized root
/// directory every request path is resolved against. Immutable for the
/// process lifetime, so handlers share it through a plain `Arc` without
/// any locking.
pub struct AppState {
    pub config: Config,
    pub root: PathBuf,
}

impl AppState {
    /// Resolve the served root and build the state. Fails when the root
    /// directory does not exist.
    pub fn new(config: Config) -> io::Result<Self> {
        let root = resolve_root(config.files.root.as_deref())?;
        Ok(Self { config, root })
    }
}

/// Canonicalize the configured root, or fall back to the directory
/// containing the executable.
fn resolve_root(configured: Option<&str>) -> io::Result<PathBuf> {
    let candidate = match configured {
        Some(path) => PathBuf::from(path),
        None => {
            let exe = std::env::current_exe()?;
            exe.parent()
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
        }
    };
    let root = candidate.canonicalize()?;
    if !root.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!("root is not a directory: {}", root.display()),
        ));
    }
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("no-such-config-file").unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 3001);
        assert_eq!(cfg.server.workers, None);
        assert_eq!(cfg.files.root, None);
        assert_eq!(cfg.files.index_files, vec!["index.html", "index.htm"]);
        assert!(cfg.files.directory_listing);
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "common");
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = Config::load_from("no-such-config-file").unwrap();
        cfg.server.host = "127.0.0.1".to_string();
        cfg.server.port = 8080;
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_invalid_socket_addr() {
        let mut cfg = Config::load_from("no-such-config-file").unwrap();
        cfg.server.host = "not a host".to_string();
        assert!(cfg.socket_addr().is_err());
    }

    #[test]
    fn test_resolve_root_explicit() {
        let dir = std::env::temp_dir();
        let root = resolve_root(Some(dir.to_str().unwrap())).unwrap();
        assert!(root.is_dir());
    }

    #[test]
    fn test_resolve_root_missing() {
        assert!(resolve_root(Some("/no/such/dir/uiserve-test")).is_err());
    }
}
