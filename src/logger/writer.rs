//! Log writer module
//!
//! Thread-safe log output to files or stdout/stderr.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

/// Global log writer instance
static LOG_WRITER: OnceLock<LogWriter> = OnceLock::new();

/// Most verbose class of line that gets written
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Off,
    Error,
    Warn,
    Info,
}

impl Level {
    /// Parse a configured level name; anything more verbose than info
    /// (`debug`, `trace`) or unrecognised behaves as info
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "off" => Self::Off,
            "error" => Self::Error,
            "warn" | "warning" => Self::Warn,
            _ => Self::Info,
        }
    }
}

/// Log output target
enum LogTarget {
    Stdout,
    Stderr,
    File(Mutex<File>),
}

impl LogTarget {
    fn open(path: Option<&str>, fallback: Self) -> io::Result<Self> {
        match path {
            Some(p) => Ok(Self::File(Mutex::new(open_log_file(p)?))),
            None => Ok(fallback),
        }
    }

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

/// Thread-safe log writer
pub struct LogWriter {
    access: LogTarget,
    error: LogTarget,
    /// Access lines are not filtered by this
    level: Level,
}

impl LogWriter {
    fn new(
        access_log_file: Option<&str>,
        error_log_file: Option<&str>,
        level: Level,
    ) -> io::Result<Self> {
        Ok(Self {
            access: LogTarget::open(access_log_file, LogTarget::Stdout)?,
            error: LogTarget::open(error_log_file, LogTarget::Stderr)?,
            level,
        })
    }

    pub fn write_access(&self, message: &str) {
        self.access.write_line(message);
    }

    pub fn write_error(&self, message: &str) {
        if self.level >= Level::Error {
            self.error.write_line(message);
        }
    }

    /// Write warning message (to error log target)
    pub fn write_warning(&self, message: &str) {
        if self.level >= Level::Warn {
            self.error.write_line(message);
        }
    }

    /// Write info message (to access log target)
    pub fn write_info(&self, message: &str) {
        if self.level >= Level::Info {
            self.access.write_line(message);
        }
    }
}

/// Open or create a log file for appending
fn open_log_file(path: &str) -> io::Result<File> {
    // Create parent directories if they don't exist
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}

/// Initialize the global log writer
///
/// Returns error if log files cannot be opened or the writer is already set.
pub fn init(
    access_log_file: Option<&str>,
    error_log_file: Option<&str>,
    level: Level,
) -> io::Result<()> {
    let writer = LogWriter::new(access_log_file, error_log_file, level)?;
    LOG_WRITER.set(writer).map_err(|_| {
        io::Error::new(
            io::ErrorKind::AlreadyExists,
            "Log writer already initialized",
        )
    })
}

/// Get the global log writer, if `init()` has been called
pub fn get() -> Option<&'static LogWriter> {
    LOG_WRITER.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_targets_append() {
        let dir = tempdir().unwrap();
        let access = dir.path().join("logs/access.log");
        let error = dir.path().join("logs/error.log");

        let writer = LogWriter::new(
            Some(access.to_str().unwrap()),
            Some(error.to_str().unwrap()),
            Level::Info,
        )
        .unwrap();
        writer.write_access("GET /view/Home");
        writer.write_info("started");
        writer.write_warning("[WARN] odd");
        writer.write_error("[ERROR] boom");

        let access_text = std::fs::read_to_string(&access).unwrap();
        assert_eq!(access_text, "GET /view/Home\nstarted\n");
        let error_text = std::fs::read_to_string(&error).unwrap();
        assert_eq!(error_text, "[WARN] odd\n[ERROR] boom\n");
    }

    #[test]
    fn test_info_can_be_silenced() {
        let dir = tempdir().unwrap();
        let access = dir.path().join("access.log");

        let writer = LogWriter::new(Some(access.to_str().unwrap()), None, Level::Warn).unwrap();
        writer.write_info("hidden");
        writer.write_access("shown");

        let text = std::fs::read_to_string(&access).unwrap();
        assert_eq!(text, "shown\n");
    }

    #[test]
    fn test_warnings_follow_level() {
        let dir = tempdir().unwrap();
        let error = dir.path().join("error.log");
        let path = error.to_str().unwrap();

        let writer = LogWriter::new(None, Some(path), Level::Error).unwrap();
        writer.write_warning("[WARN] dropped");
        writer.write_error("[ERROR] kept");
        assert_eq!(std::fs::read_to_string(&error).unwrap(), "[ERROR] kept\n");

        let writer = LogWriter::new(None, Some(path), Level::Off).unwrap();
        writer.write_warning("[WARN] dropped");
        writer.write_error("[ERROR] dropped");
        assert_eq!(std::fs::read_to_string(&error).unwrap(), "[ERROR] kept\n");
    }

    #[test]
    fn test_level_parse() {
        assert_eq!(Level::parse("info"), Level::Info);
        assert_eq!(Level::parse("DEBUG"), Level::Info);
        assert_eq!(Level::parse("trace"), Level::Info);
        assert_eq!(Level::parse("Warning"), Level::Warn);
        assert_eq!(Level::parse("warn"), Level::Warn);
        assert_eq!(Level::parse("Error"), Level::Error);
        assert_eq!(Level::parse("off"), Level::Off);
        assert!(Level::Warn > Level::Error);
    }
}
