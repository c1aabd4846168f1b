//! Result aggregation — orchestration layer.
//!
//! Folds all variant outcomes into the two run tables plus the per-variant
//! message map. Arrival order decides which contiguous block lands where;
//! nothing is dropped, nothing is reordered within one outcome.

use crate::models::outcome::{AggregateReport, VariantOutcome};

/// Merges outcomes column-wise in the order they are handed in.
pub fn aggregate(outcomes: impl IntoIterator<Item = VariantOutcome>) -> AggregateReport {
    let mut report = AggregateReport::default();
    for outcome in outcomes {
        report.converted.extend_from(&outcome.selected_rows);
        report.skipped.extend_from(&outcome.skipped_rows);
        report
            .messages
            .insert(outcome.variant_name.clone(), outcome.report_message());
    }
    report
}
