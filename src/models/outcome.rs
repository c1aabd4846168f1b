//! Per-variant worker outcomes and the merged run report.

use std::collections::BTreeMap;

use crate::models::order::ColumnTable;

/// Placeholder message for a variant whose query returned zero rows.
pub const NO_DATA_MESSAGE: &str = "no data for this selection";

/// Terminal state of one dispatched variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// Rows were extracted and classified (conversion may or may not have run).
    Processed,
    /// The query returned zero rows, signaled by the transient pop-up.
    NoData,
    /// The worker failed; the text describes the error.
    Failed(String),
}

/// Everything one variant worker produced. Emitted exactly once per
/// dispatched variant, consumed exactly once by the aggregator.
#[derive(Debug, Clone)]
pub struct VariantOutcome {
    pub variant_name: String,
    /// Rows classified for conversion, column-aligned.
    pub selected_rows: ColumnTable,
    /// Rows left for the next cycle, column-aligned.
    pub skipped_rows: ColumnTable,
    /// Status-bar text captured after the worker finished, if any.
    pub session_message: Option<String>,
    pub status: OutcomeStatus,
}

impl VariantOutcome {
    pub fn processed(
        variant_name: impl Into<String>,
        selected_rows: ColumnTable,
        skipped_rows: ColumnTable,
        session_message: Option<String>,
    ) -> Self {
        Self {
            variant_name: variant_name.into(),
            selected_rows,
            skipped_rows,
            session_message,
            status: OutcomeStatus::Processed,
        }
    }

    pub fn no_data(variant_name: impl Into<String>) -> Self {
        Self {
            variant_name: variant_name.into(),
            selected_rows: ColumnTable::new(),
            skipped_rows: ColumnTable::new(),
            session_message: Some(NO_DATA_MESSAGE.to_string()),
            status: OutcomeStatus::NoData,
        }
    }

    pub fn failed(variant_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            variant_name: variant_name.into(),
            selected_rows: ColumnTable::new(),
            skipped_rows: ColumnTable::new(),
            session_message: None,
            status: OutcomeStatus::Failed(error.into()),
        }
    }

    pub fn had_no_data(&self) -> bool {
        self.status == OutcomeStatus::NoData
    }

    /// The message this variant contributes to the run report: the captured
    /// status-bar text, the no-data placeholder, or the error text.
    pub fn report_message(&self) -> String {
        match &self.status {
            OutcomeStatus::Failed(error) => error.clone(),
            _ => self.session_message.clone().unwrap_or_default(),
        }
    }
}

/// Column-wise merge of all variant outcomes of one run.
#[derive(Debug, Clone, Default)]
pub struct AggregateReport {
    pub converted: ColumnTable,
    pub skipped: ColumnTable,
    /// One entry per dispatched variant.
    pub messages: BTreeMap<String, String>,
}

impl AggregateReport {
    /// Variants whose status was [`OutcomeStatus::Failed`] never contribute
    /// rows, so total row count is converted + skipped.
    pub fn total_rows(&self) -> usize {
        self.converted.row_count() + self.skipped.row_count()
    }
}
