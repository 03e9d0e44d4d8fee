//! Pipeline configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use uuid::Uuid;

/// Default freshness window for posting dates, in days.
pub const DEFAULT_FRESHNESS_DAYS: i64 = 90;

/// Default number of scrape calls allowed before a cooldown.
pub const DEFAULT_SCRAPE_CALLS_PER_WINDOW: u32 = 10;

/// Default cooldown once the scrape budget is exhausted.
pub const DEFAULT_SCRAPE_COOLDOWN: Duration = Duration::from_secs(60);

/// Name of the output document written by the persister.
pub const RESULTS_FILE_NAME: &str = "step_3_job_scrutinizer_results.json";

/// Configuration for a scrutinization run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Identifies the run; keys the output directory
    pub run_id: String,

    /// Base directory for per-run result files
    pub output_dir: PathBuf,

    /// Maximum posting age accepted by the validator, in days
    pub freshness_days: i64,

    /// Scrape calls allowed before a mandatory cooldown
    pub scrape_calls_per_window: u32,

    /// Cooldown duration once the scrape budget is spent
    pub scrape_cooldown: Duration,

    /// URLs processed at once. 1 reproduces strictly sequential
    /// processing; higher values use a bounded pool.
    pub concurrency: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            output_dir: PathBuf::from("./results"),
            freshness_days: DEFAULT_FRESHNESS_DAYS,
            scrape_calls_per_window: DEFAULT_SCRAPE_CALLS_PER_WINDOW,
            scrape_cooldown: DEFAULT_SCRAPE_COOLDOWN,
            concurrency: 1,
        }
    }
}

impl PipelineConfig {
    /// Create a config for a specific run id.
    pub fn for_run(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            ..Default::default()
        }
    }

    /// Set the base output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the freshness window in days.
    pub fn with_freshness_days(mut self, days: i64) -> Self {
        self.freshness_days = days;
        self
    }

    /// Set the scrape rate-limit ceiling.
    pub fn with_scrape_budget(mut self, calls_per_window: u32, cooldown: Duration) -> Self {
        self.scrape_calls_per_window = calls_per_window;
        self.scrape_cooldown = cooldown;
        self
    }

    /// Set the worker-pool size.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Directory all of this run's artifacts land in.
    pub fn run_dir(&self) -> PathBuf {
        self.output_dir.join(&self.run_id)
    }

    /// Deterministic path of the output document for this run.
    pub fn results_path(&self) -> PathBuf {
        self.run_dir().join(RESULTS_FILE_NAME)
    }

    /// Path of the debug artifact written when serialization fails.
    pub fn debug_path(&self) -> PathBuf {
        debug_sibling(&self.results_path())
    }
}

/// Derive the debug-artifact path from an output path: the same file with
/// an `_debug` suffix before the extension.
pub fn debug_sibling(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("results");
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("json");
    path.with_file_name(format!("{stem}_debug.{ext}"))
}
