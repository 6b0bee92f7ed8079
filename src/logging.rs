//! Log output. The CLI writes to stderr. A TUI session owns the terminal,
//! so its logs go to `finmind.log` in the data dir, or nowhere if that
//! file cannot be opened.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_FILE: &str = "finmind.log";

/// Whether these arguments launch the dashboard rather than a one-shot command.
pub(crate) fn is_tui(args: &[String]) -> bool {
    args.get(1).map_or(true, |cmd| cmd == "tui")
}

pub(crate) fn log_file_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "finmind", "FinMind")
        .map(|d| d.data_dir().join(LOG_FILE))
}

/// `RUST_LOG` wins; otherwise only warnings are written.
pub(crate) fn init(tui: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new("warn")
    };

    let writer = if tui {
        tui_writer()
    } else {
        BoxMakeWriter::new(std::io::stderr)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(!tui)
                .with_writer(writer)
                .compact(),
        )
        .init();
}

fn tui_writer() -> BoxMakeWriter {
    match log_file_path().and_then(|path| open_log(&path).ok()) {
        Some(file) => BoxMakeWriter::new(Mutex::new(file)),
        None => BoxMakeWriter::new(std::io::sink),
    }
}

/// Open `path` for appending, creating its directory first.
fn open_log(path: &Path) -> std::io::Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
