pub mod config;
pub mod error;
pub mod outputs;
pub mod pipeline;
pub mod source;

pub use config::SyncConfig;
pub use error::{Result, SyncError};
pub use outputs::{render_document, write_outputs, OutputPaths};
pub use pipeline::{collect_schedule, run, CollectedSchedule, SyncOutcome};
pub use source::{DirectorySheetSource, HttpSheetSource, SheetSource};
