//! File logging.  The terminal belongs to the UI, so log records go to a file
//! or nowhere.
use anyhow::Context;
use flexi_logger::{detailed_format, FileSpec, Logger, LoggerHandle, WriteMode};
use std::path::PathBuf;

const LOG_FILE_BASENAME: &str = "contribgraph";

pub(crate) const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct LogConfig {
    /// Directory to write logs to; no logging happens if this is unset
    pub(crate) dir: Option<PathBuf>,
    /// Log specification such as `debug` or `info,contribgraph::graph=debug`.
    /// `RUST_LOG` takes precedence when set.
    pub(crate) level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            dir: None,
            level: String::from(DEFAULT_LOG_LEVEL),
        }
    }
}

impl LogConfig {
    /// Starts logging if a directory was configured.  The returned handle must
    /// be kept alive for as long as logging is wanted.
    pub(crate) fn start(&self) -> anyhow::Result<Option<LoggerHandle>> {
        let Some(dir) = self.dir.as_ref() else {
            return Ok(None);
        };
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
        let handle = Logger::try_with_env_or_str(&self.level)
            .with_context(|| format!("invalid log specification {:?}", self.level))?
            .log_to_file(
                FileSpec::default()
                    .directory(dir)
                    .basename(LOG_FILE_BASENAME),
            )
            .write_mode(WriteMode::BufferAndFlush)
            .format(detailed_format)
            .start()
            .context("failed to start logger")?;
        log::info!(
            "{} {} logging to {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            dir.display()
        );
        Ok(Some(handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_dir_no_logger() {
        let handle = LogConfig::default().start().unwrap();
        assert!(handle.is_none());
    }
}
