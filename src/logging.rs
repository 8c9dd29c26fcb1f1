use std::env;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_DIRECTIVE: &str = "issue_monitor=info";
const LOG_FILE: &str = "issue-monitor.log";

/// Where log lines go. The terminal UI owns stdout, so it logs to a file.
pub enum LogTarget {
    Stderr,
    File,
}

/// `RUST_LOG` overrides the default filter; `LOG_FORMAT=json` switches to JSON lines.
pub fn init(target: LogTarget) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(DEFAULT_DIRECTIVE.parse()?);
    let use_json = env::var("LOG_FORMAT")
        .map(|value| value.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let registry = tracing_subscriber::registry().with(filter);

    match target {
        LogTarget::Stderr if use_json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
        LogTarget::Stderr => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?,
        LogTarget::File => {
            let file = Mutex::new(open_log_file(&log_path())?);
            if use_json {
                registry
                    .with(tracing_subscriber::fmt::layer().json().with_writer(file))
                    .try_init()?;
            } else {
                registry
                    .with(
                        tracing_subscriber::fmt::layer()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .try_init()?;
            }
        }
    }
    Ok(())
}

pub fn log_path() -> PathBuf {
    state_dir().join("issue-monitor").join(LOG_FILE)
}

fn state_dir() -> PathBuf {
    if let Ok(dir) = env::var("XDG_STATE_HOME") {
        return Path::new(&dir).to_path_buf();
    }

    if let Ok(home) = env::var("HOME") {
        return Path::new(&home).join(".local").join("state");
    }

    env::temp_dir()
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::{LOG_FILE, log_path};

    #[test]
    fn log_file_lives_under_app_directory() {
        let path = log_path();
        assert!(path.ends_with(format!("issue-monitor/{}", LOG_FILE)));
    }
}
