//! File logging for the CLI. Stdout stays reserved for command output.

use anyhow::{Context, Result};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "taskcal";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGER: OnceCell<(PathBuf, LoggerHandle)> = OnceCell::new();

/// Starts logging into `log_dir`. Later calls are no-ops and return the
/// directory chosen by the first call.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<PathBuf> {
    if let Some((dir, _)) = LOGGER.get() {
        return Ok(dir.clone());
    }
    std::fs::create_dir_all(log_dir).with_context(|| format!("creating {:?}", log_dir))?;
    let handle = Logger::try_with_str(level)
        .with_context(|| format!("invalid log level {:?}", level))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::Direct)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .context("starting logger")?;
    let (dir, _) = LOGGER.get_or_init(|| (log_dir.to_path_buf(), handle));
    info!(
        "taskcal {} logging at {} into {}",
        env!("CARGO_PKG_VERSION"),
        level,
        dir.display()
    );
    Ok(dir.clone())
}
