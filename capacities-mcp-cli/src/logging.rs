//! Log destination setup
//!
//! Logs normally go to stderr. When serving MCP over a pipe they go to a file
//! under `~/.capacities-mcp/` instead, written through [`FileWriterGuard`] so
//! every line is on disk even if the client kills the process.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Directory under the home directory holding the MCP log
pub const LOG_DIR_NAME: &str = ".capacities-mcp";

/// Default MCP log file name
pub const DEFAULT_LOG_FILE: &str = "mcp.log";

/// Environment variable overriding the MCP log file name
pub const LOG_FILE_ENV_VAR: &str = "CAPACITIES_MCP_LOG_FILE";

/// A thread-safe writer that flushes and syncs the file after every write.
///
/// Multiple threads can share one instance; each write takes the lock, writes,
/// flushes and calls `sync_all` before releasing it.
#[derive(Clone)]
pub struct FileWriterGuard {
    file: Arc<Mutex<File>>,
}

impl FileWriterGuard {
    /// Creates a new `FileWriterGuard` wrapping the given file.
    pub fn new(file: Arc<Mutex<File>>) -> Self {
        Self { file }
    }

    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, File>> {
        self.file
            .lock()
            .map_err(|_| io::Error::other("log file mutex was poisoned"))
    }
}

impl Write for FileWriterGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut file = self.lock()?;
        let written = file.write(buf)?;
        file.flush()?;
        file.sync_all()?;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut file = self.lock()?;
        file.flush()?;
        file.sync_all()
    }
}

/// Pick the log level from the global flags.
///
/// MCP mode always logs at debug so the log file is useful after the fact.
pub fn log_level(mcp_mode: bool, quiet: bool, debug: bool, verbose: bool) -> Level {
    if mcp_mode {
        Level::DEBUG
    } else if quiet {
        Level::ERROR
    } else if debug {
        Level::DEBUG
    } else if verbose {
        Level::TRACE
    } else {
        Level::INFO
    }
}

/// `~/.capacities-mcp/<file>`, falling back to the working directory without a home
pub fn mcp_log_path() -> PathBuf {
    let log_dir = dirs::home_dir()
        .map(|home| home.join(LOG_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(LOG_DIR_NAME));
    let file_name =
        std::env::var(LOG_FILE_ENV_VAR).unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
    log_dir.join(file_name)
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// `RUST_LOG` wins over the level chosen from flags
fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

/// Install the global tracing subscriber
pub fn init_logging(level: Level, mcp_mode: bool) {
    if mcp_mode {
        let log_file = mcp_log_path();
        match open_log_file(&log_file) {
            Ok(file) => {
                let guard = FileWriterGuard::new(Arc::new(Mutex::new(file)));
                tracing_subscriber::fmt()
                    .with_writer(move || guard.clone())
                    .with_env_filter(env_filter(level))
                    .with_ansi(false)
                    .init();
                return;
            }
            Err(e) => {
                eprintln!(
                    "Failed to open log file {}, using stderr: {e}",
                    log_file.display()
                );
            }
        }
    }

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(env_filter(level))
        .init();
}
