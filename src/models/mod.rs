pub mod order;
pub mod outcome;

pub use order::{ColumnTable, OrderRow, ORDER_COLUMNS};
pub use outcome::{AggregateReport, OutcomeStatus, VariantOutcome, NO_DATA_MESSAGE};
