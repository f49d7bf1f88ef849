//! Import pipeline module
//!
//! Streams USDA documents through the mapper into batched writes.

pub mod pipeline;
pub mod report;
pub mod sink;
pub mod source;
pub mod variant;

pub use pipeline::{CancelFlag, ImportError, ImportPipeline, ImportStats, PartialImport};
pub use report::ImportReport;
pub use sink::{FoodSink, SinkError, SqliteSink};
pub use source::{RawDocument, RecordSource, SourceError, SqliteSource};
pub use variant::{BrandedFoods, FoodVariant, SurveyFoods};
