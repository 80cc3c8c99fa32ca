//! Logger module
//!
//! Access and error logging for the static file server. Both streams write
//! to stdout/stderr by default, or to append-mode files when configured.
//! Before `init` runs (and in tests) messages fall back to stdout/stderr.

use crate::config::{Config, LoggingConfig};
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Log output target
enum LogTarget {
    Stdout,
    Stderr,
    File(Mutex<File>),
}

impl LogTarget {
    fn write_line(&self, message: &str) {
        match self {
            Self::Stdout => println!("{message}"),
            Self::Stderr => eprintln!("{message}"),
            Self::File(file) => {
                if let Ok(mut f) = file.lock() {
                    let _ = writeln!(f, "{message}");
                }
            }
        }
    }
}

struct Logger {
    access: LogTarget,
    error: LogTarget,
}

/// Initialize the global logger. Call once at startup, before serving.
pub fn init(config: &LoggingConfig) -> io::Result<()> {
    let access = match config.access_log_file.as_deref() {
        Some(path) => LogTarget::File(Mutex::new(open_log_file(path)?)),
        None => LogTarget::Stdout,
    };
    let error = match config.error_log_file.as_deref() {
        Some(path) => LogTarget::File(Mutex::new(open_log_file(path)?)),
        None => LogTarget::Stderr,
    };
    LOGGER
        .set(Logger { access, error })
        .map_err(|_| io::Error::new(io::ErrorKind::AlreadyExists, "logger already initialized"))
}

/// Open or create a log file for appending
fn open_log_file(path: &str) -> io::Result<File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn write_info(message: &str) {
    match LOGGER.get() {
        Some(logger) => logger.access.write_line(message),
        None => println!("{message}"),
    }
}

fn write_error(message: &str) {
    match LOGGER.get() {
        Some(logger) => logger.error.write_line(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_server_start(addr: &SocketAddr, root: &Path, config: &Config) {
    write_info("======================================");
    write_info("Static asset server started");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Serving files from: {}", root.display()));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("Press Ctrl+C to stop");
    write_info("======================================\n");
}

pub fn log_shutdown() {
    write_info("\nServer stopped");
}

/// One line per completed request.
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    pub remote_addr: String,
    pub time: chrono::DateTime<Local>,
    pub method: String,
    pub path: String,
    pub status: u16,
    pub body_bytes: usize,
}

impl AccessLogEntry {
    pub fn new(remote_addr: &SocketAddr, method: &str, path: &str) -> Self {
        Self {
            remote_addr: remote_addr.ip().to_string(),
            time: Local::now(),
            method: method.to_string(),
            path: path.to_string(),
            status: 200,
            body_bytes: 0,
        }
    }

    /// Format the entry as `common`, `combined`, or `json`. Unknown format
    /// names fall back to the common format.
    pub fn format(&self, format: &str) -> String {
        match format {
            "combined" => format!("{} \"-\" \"-\"", self.format_common()),
            "json" => self.format_json(),
            _ => self.format_common(),
        }
    }

    /// Common Log Format:
    /// `remote - - [time] "METHOD /path HTTP/1.1" status bytes`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{} {} HTTP/1.1\" {} {}",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.method,
            self.path,
            self.status,
            self.body_bytes,
        )
    }

    fn format_json(&self) -> String {
        serde_json::json!({
            "remote_addr": self.remote_addr,
            "time": self.time.to_rfc3339(),
            "method": self.method,
            "path": self.path,
            "status": self.status,
            "body_bytes": self.body_bytes,
        })
        .to_string()
    }
}

/// Write a formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&entry.format(format));
}
