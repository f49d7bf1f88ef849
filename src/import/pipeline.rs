//! Import pipeline
//!
//! Streams raw documents from a source, maps the usable ones and writes them to a
//! sink in fixed-size batches. Runs strictly sequentially on the calling thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use super::sink::{FoodSink, SinkError};
use super::source::{RecordSource, SourceError};
use super::variant::FoodVariant;
use crate::config::DEFAULT_BATCH_SIZE;
use crate::models::Food;

/// Errors that end an import run
#[derive(Debug, Error)]
pub enum ImportError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("Import cancelled")]
    Cancelled,
}

/// Running totals of an import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    /// Records written to the sink
    pub imported: u64,
    /// Records that decoded but had no nutrients
    pub skipped: u64,
    /// Documents that did not decode into the expected shape
    pub decode_failures: u64,
    /// Successful bulk writes
    pub batches: u64,
}

/// A run that stopped early, with the totals reached before it stopped
///
/// Batches already flushed stay in the sink.
#[derive(Debug, Error)]
#[error("{error} (imported {}, skipped {} before stopping)", .stats.imported, .stats.skipped)]
pub struct PartialImport {
    pub stats: ImportStats,
    #[source]
    pub error: ImportError,
}

/// Shared flag used to ask a running import to stop
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Batch and counters owned by one run
struct Accumulator {
    stats: ImportStats,
    batch: Vec<Food>,
    next_id: i64,
}

impl Accumulator {
    fn new(capacity: usize) -> Self {
        Self {
            stats: ImportStats::default(),
            batch: Vec::with_capacity(capacity),
            next_id: 1,
        }
    }

    /// Append a mapped record; ids advance only for records that are mapped
    fn push_mapped<V: FoodVariant>(&mut self, record: &V::Record) {
        let food = V::map(record, self.next_id);
        self.next_id += 1;
        self.batch.push(food);
    }

    fn flush<K: FoodSink>(&mut self, sink: &mut K) -> Result<(), SinkError> {
        sink.insert_batch(&self.batch)?;
        self.stats.imported += self.batch.len() as u64;
        self.stats.batches += 1;
        self.batch.clear();
        Ok(())
    }

    fn fail(&self, error: impl Into<ImportError>) -> PartialImport {
        PartialImport {
            stats: self.stats,
            error: error.into(),
        }
    }
}

/// Sequential import from one source into one sink
pub struct ImportPipeline<S, K> {
    source: S,
    sink: K,
    batch_size: usize,
    expected_total: Option<u64>,
    cancel: CancelFlag,
}

impl<S: RecordSource, K: FoodSink> ImportPipeline<S, K> {
    pub fn new(source: S, sink: K) -> Self {
        Self {
            source,
            sink,
            batch_size: DEFAULT_BATCH_SIZE,
            expected_total: None,
            cancel: CancelFlag::new(),
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Source size used for progress percentages in the logs
    pub fn with_expected_total(mut self, total: u64) -> Self {
        self.expected_total = Some(total);
        self
    }

    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Run the import to completion
    ///
    /// Stops at the first source or sink error, or when cancelled, returning the
    /// totals reached so far. Cancellation prevents any further flush.
    pub fn run<V: FoodVariant>(&mut self) -> Result<ImportStats, PartialImport> {
        let mut acc = Accumulator::new(self.batch_size);

        loop {
            if self.cancel.is_cancelled() {
                return Err(acc.fail(ImportError::Cancelled));
            }

            let document = match self.source.next_document() {
                Ok(Some(document)) => document,
                Ok(None) => break,
                Err(e) => return Err(acc.fail(e)),
            };

            let record = match V::decode(&document.body) {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(
                        "Failed to decode {} food at source row {}: {}",
                        V::LABEL,
                        document.key,
                        e
                    );
                    acc.stats.decode_failures += 1;
                    continue;
                }
            };

            if V::nutrient_count(&record) == 0 {
                tracing::debug!("Skipping {} food at source row {}: no nutrients", V::LABEL, document.key);
                acc.stats.skipped += 1;
                continue;
            }

            acc.push_mapped::<V>(&record);

            if acc.batch.len() >= self.batch_size {
                if self.cancel.is_cancelled() {
                    return Err(acc.fail(ImportError::Cancelled));
                }
                if let Err(e) = acc.flush(&mut self.sink) {
                    return Err(acc.fail(e));
                }
                self.log_progress::<V>(&acc.stats);
            }
        }

        if !acc.batch.is_empty() {
            if self.cancel.is_cancelled() {
                return Err(acc.fail(ImportError::Cancelled));
            }
            if let Err(e) = acc.flush(&mut self.sink) {
                return Err(acc.fail(e));
            }
        }

        tracing::info!(
            "Finished {} import: {} imported, {} skipped, {} undecodable",
            V::LABEL,
            acc.stats.imported,
            acc.stats.skipped,
            acc.stats.decode_failures
        );
        Ok(acc.stats)
    }

    fn log_progress<V: FoodVariant>(&self, stats: &ImportStats) {
        match self.expected_total {
            Some(total) if total > 0 => {
                let seen = stats.imported + stats.skipped + stats.decode_failures;
                let percent = seen as f64 / total as f64 * 100.0;
                tracing::info!("Imported {} {} foods... ({:.1}%)", stats.imported, V::LABEL, percent);
            }
            _ => tracing::info!("Imported {} {} foods...", stats.imported, V::LABEL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::source::RawDocument;
    use crate::import::variant::{BrandedFoods, SurveyFoods};

    /// In-memory source over prepared document bodies
    struct VecSource {
        docs: std::vec::IntoIter<String>,
        key: i64,
        fail_after: Option<i64>,
    }

    impl VecSource {
        fn new(docs: Vec<String>) -> Self {
            Self {
                docs: docs.into_iter(),
                key: 0,
                fail_after: None,
            }
        }
    }

    impl RecordSource for VecSource {
        fn count(&mut self) -> Result<u64, SourceError> {
            Ok(self.docs.len() as u64)
        }

        fn next_document(&mut self) -> Result<Option<RawDocument>, SourceError> {
            if self.fail_after == Some(self.key) {
                return Err(SourceError::Db(crate::db::DbError::MissingTable("gone".to_string())));
            }
            self.key += 1;
            Ok(self.docs.next().map(|body| RawDocument { key: self.key, body }))
        }
    }

    /// Sink that records the ids of every bulk write
    #[derive(Default)]
    struct RecordingSink {
        calls: Vec<Vec<i64>>,
        fail_on_call: Option<usize>,
        cancel_after_write: Option<CancelFlag>,
    }

    impl FoodSink for RecordingSink {
        fn insert_batch(&mut self, batch: &[Food]) -> Result<(), SinkError> {
            if self.fail_on_call == Some(self.calls.len()) {
                return Err(SinkError::Db(crate::db::DbError::MissingTable("foods".to_string())));
            }
            self.calls.push(batch.iter().map(|f| f.id).collect());
            if let Some(flag) = &self.cancel_after_write {
                flag.cancel();
            }
            Ok(())
        }
    }

    fn survey_doc(i: usize) -> String {
        format!(
            r#"{{"fdcId": {}, "description": "Food {}", "foodNutrients": [{{"nutrient": {{"id": 1008}}, "amount": 100}}]}}"#,
            i, i
        )
    }

    fn empty_doc(i: usize) -> String {
        format!(r#"{{"fdcId": {}, "description": "Empty {}", "foodNutrients": []}}"#, i, i)
    }

    #[test]
    fn test_batches_flush_at_capacity() {
        let docs = (0..2500).map(survey_doc).collect();
        let mut sink = RecordingSink::default();

        let stats = ImportPipeline::new(VecSource::new(docs), &mut sink)
            .run::<SurveyFoods>()
            .unwrap();

        let sizes: Vec<usize> = sink.calls.iter().map(|c| c.len()).collect();
        assert_eq!(sizes, vec![1000, 1000, 500]);
        assert_eq!(stats.imported, 2500);
        assert_eq!(stats.batches, 3);
        assert_eq!(stats.skipped, 0);
    }

    #[test]
    fn test_exact_multiple_has_no_empty_flush() {
        let docs = (0..4).map(survey_doc).collect();
        let mut sink = RecordingSink::default();

        let stats = ImportPipeline::new(VecSource::new(docs), &mut sink)
            .with_batch_size(2)
            .run::<SurveyFoods>()
            .unwrap();

        assert_eq!(sink.calls.len(), 2);
        assert_eq!(stats.imported, 4);
    }

    #[test]
    fn test_empty_nutrients_are_skipped_and_ids_stay_contiguous() {
        let docs = vec![
            survey_doc(0),
            empty_doc(1),
            "{not json".to_string(),
            survey_doc(2),
            r#"{"foodNutrients": 12}"#.to_string(),
            empty_doc(3),
            survey_doc(4),
        ];
        let mut sink = RecordingSink::default();

        let stats = ImportPipeline::new(VecSource::new(docs), &mut sink)
            .run::<SurveyFoods>()
            .unwrap();

        assert_eq!(sink.calls, vec![vec![1, 2, 3]]);
        assert_eq!(stats.imported, 3);
        assert_eq!(stats.skipped, 2);
        assert_eq!(stats.decode_failures, 2);
    }

    #[test]
    fn test_null_nutrients_are_skipped_not_failed() {
        let docs = vec![
            r#"{"fdcId": 1, "description": "Null list", "foodNutrients": null}"#.to_string(),
            r#"{"fdcId": 2.0, "brandOwner": null, "foodNutrients": [{"nutrient": {"id": 1008}, "amount": null}]}"#
                .to_string(),
        ];
        let mut sink = RecordingSink::default();

        let stats = ImportPipeline::new(VecSource::new(docs), &mut sink)
            .run::<BrandedFoods>()
            .unwrap();

        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.decode_failures, 0);
        assert_eq!(stats.imported, 1);
        assert_eq!(sink.calls, vec![vec![1]]);
    }

    #[test]
    fn test_ids_restart_per_run() {
        let mut sink = RecordingSink::default();
        for _ in 0..2 {
            let docs = (0..2).map(survey_doc).collect();
            ImportPipeline::new(VecSource::new(docs), &mut sink)
                .run::<SurveyFoods>()
                .unwrap();
        }
        assert_eq!(sink.calls, vec![vec![1, 2], vec![1, 2]]);
    }

    #[test]
    fn test_empty_source() {
        let mut sink = RecordingSink::default();
        let stats = ImportPipeline::new(VecSource::new(Vec::new()), &mut sink)
            .run::<BrandedFoods>()
            .unwrap();
        assert_eq!(stats, ImportStats::default());
        assert!(sink.calls.is_empty());
    }

    #[test]
    fn test_sink_failure_reports_partial_counts() {
        let docs = (0..5).map(survey_doc).chain(std::iter::once(empty_doc(9))).collect();
        let mut sink = RecordingSink {
            fail_on_call: Some(1),
            ..Default::default()
        };

        let err = ImportPipeline::new(VecSource::new(docs), &mut sink)
            .with_batch_size(2)
            .run::<SurveyFoods>()
            .unwrap_err();

        assert!(matches!(err.error, ImportError::Sink(_)));
        assert_eq!(err.stats.imported, 2);
        assert_eq!(sink.calls, vec![vec![1, 2]]);
    }

    #[test]
    fn test_final_flush_failure() {
        let docs = (0..3).map(survey_doc).collect();
        let mut sink = RecordingSink {
            fail_on_call: Some(1),
            ..Default::default()
        };

        let err = ImportPipeline::new(VecSource::new(docs), &mut sink)
            .with_batch_size(2)
            .run::<SurveyFoods>()
            .unwrap_err();

        assert!(matches!(err.error, ImportError::Sink(_)));
        assert_eq!(err.stats.imported, 2);
    }

    #[test]
    fn test_source_failure_reports_partial_counts() {
        let docs = (0..5).map(survey_doc).collect();
        let mut source = VecSource::new(docs);
        source.fail_after = Some(3);
        let mut sink = RecordingSink::default();

        let err = ImportPipeline::new(source, &mut sink)
            .with_batch_size(2)
            .run::<SurveyFoods>()
            .unwrap_err();

        assert!(matches!(err.error, ImportError::Source(_)));
        assert_eq!(err.stats.imported, 2);
        assert_eq!(sink.calls.len(), 1);
    }

    #[test]
    fn test_cancel_before_start() {
        let cancel = CancelFlag::new();
        cancel.cancel();
        let mut sink = RecordingSink::default();

        let err = ImportPipeline::new(VecSource::new(vec![survey_doc(0)]), &mut sink)
            .with_cancel_flag(cancel)
            .run::<SurveyFoods>()
            .unwrap_err();

        assert!(matches!(err.error, ImportError::Cancelled));
        assert!(sink.calls.is_empty());
    }

    #[test]
    fn test_cancel_stops_further_flushes() {
        let cancel = CancelFlag::new();
        let docs = (0..5).map(survey_doc).collect();
        let mut sink = RecordingSink {
            cancel_after_write: Some(cancel.clone()),
            ..Default::default()
        };

        let err = ImportPipeline::new(VecSource::new(docs), &mut sink)
            .with_batch_size(2)
            .with_cancel_flag(cancel)
            .run::<SurveyFoods>()
            .unwrap_err();

        assert!(matches!(err.error, ImportError::Cancelled));
        assert_eq!(err.stats.imported, 2);
        assert_eq!(sink.calls.len(), 1);
    }

    #[test]
    fn test_branded_records_are_normalized() {
        let doc = r#"{
            "fdcId": 1,
            "description": "PEANUT BUTTER",
            "servingSize": 50,
            "servingSizeUnit": "g",
            "foodNutrients": [{"nutrient": {"id": 1003}, "amount": 10}]
        }"#
        .to_string();

        struct KeepSink(Vec<Food>);
        impl FoodSink for KeepSink {
            fn insert_batch(&mut self, batch: &[Food]) -> Result<(), SinkError> {
                self.0.extend_from_slice(batch);
                Ok(())
            }
        }

        let mut sink = KeepSink(Vec::new());
        ImportPipeline::new(VecSource::new(vec![doc]), &mut sink)
            .run::<BrandedFoods>()
            .unwrap();

        let facts = sink.0[0].nutrition_facts.as_ref().unwrap();
        assert!((facts.protein_g - 20.0).abs() < 1e-9);
    }
}
