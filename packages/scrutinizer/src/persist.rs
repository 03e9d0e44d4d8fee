//! Durable persistence of the result set.
//!
//! The output document is written atomically: serialize, write to a
//! temporary sibling, fsync, rename over the final path. A reader never
//! observes a partial file. When serialization or the write fails, a
//! debug artifact with the raw in-memory data is emitted next to the
//! output path and the failure is surfaced to the caller — persistence
//! failure is pipeline failure even if processing completed.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::error::{PersistError, PersistResult};
use crate::types::config::debug_sibling;
use crate::types::report::JobReport;

/// Persist the report to `path`, writing a debug artifact on failure.
pub async fn persist_report(report: &JobReport, path: &Path) -> PersistResult<()> {
    match write_atomically(report, path).await {
        Ok(()) => {
            tracing::info!(path = %path.display(), jobs = report.len(), "result set persisted");
            Ok(())
        }
        Err(err) => {
            tracing::error!(path = %path.display(), error = %err, "persistence failed");
            write_debug_artifact(report, path, &err).await;
            Err(err)
        }
    }
}

async fn write_atomically(report: &JobReport, path: &Path) -> PersistResult<()> {
    let io_err = |source: std::io::Error| PersistError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
    }

    let bytes = serde_json::to_vec_pretty(report).map_err(PersistError::Serialize)?;

    let tmp = tmp_sibling(path);
    let mut file = tokio::fs::File::create(&tmp).await.map_err(io_err)?;
    file.write_all(&bytes).await.map_err(io_err)?;
    file.sync_all().await.map_err(io_err)?;
    drop(file);

    tokio::fs::rename(&tmp, path).await.map_err(io_err)
}

/// Best-effort debug dump: the error plus the raw in-memory data, in a
/// sibling file. Uses `Debug` formatting for the data so the dump
/// succeeds even when JSON serialization was the failure.
async fn write_debug_artifact(report: &JobReport, path: &Path, err: &PersistError) {
    let debug_path = debug_sibling(path);
    let payload = serde_json::json!({
        "error": err.to_string(),
        "raw_data": format!("{report:?}"),
    });
    let bytes = serde_json::to_vec_pretty(&payload).unwrap_or_else(|_| b"{}".to_vec());

    match tokio::fs::write(&debug_path, bytes).await {
        Ok(()) => {
            tracing::warn!(path = %debug_path.display(), "debug artifact written");
        }
        Err(e) => {
            tracing::error!(path = %debug_path.display(), error = %e, "could not write debug artifact");
        }
    }
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("results.json");
    path.with_file_name(format!(".{name}.tmp"))
}
