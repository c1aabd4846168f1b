pub mod classifier;
pub mod export;
pub mod order_list;
pub mod status_sink;

pub use classifier::{classify, classify_row, ClassificationFactors, ClassificationResult};
pub use export::CsvExporter;
pub use status_sink::{FileStatusSink, StatusEntry, StatusSink};
