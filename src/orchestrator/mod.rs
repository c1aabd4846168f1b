//! Orchestration layer.
//!
//! `dispatcher` fans the variant list out over the session pool and joins
//! every unit; `aggregator` merges the collected outcomes; `batch_processor`
//! owns the run lifecycle around both. Scheduling and bookkeeping only —
//! no business decisions live up here.

pub mod aggregator;
pub mod batch_processor;
pub mod dispatcher;

pub use aggregator::aggregate;
pub use batch_processor::{App, RunSummary};
pub use dispatcher::DispatchPool;
