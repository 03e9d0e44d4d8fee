//! The scrutinization pipeline: dedup, stage machine, collection, run.

pub mod collect;
pub mod ledger;
pub mod run;
pub mod stage;
pub mod validate;

pub use collect::ResultCollector;
pub use ledger::UrlLedger;
pub use run::{RunSummary, Scrutinizer};
pub use stage::{drive_url, SkipStage, Terminal, UrlOutcome};
pub use validate::{parse_posting_date, validate};
