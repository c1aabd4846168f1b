//! Per-variant dispatch context.
//!
//! Captures "which variant am I, on which slot" for workers and their log
//! lines.

use std::fmt::Display;

/// Context of one dispatched variant.
#[derive(Debug, Clone)]
pub struct VariantCtx {
    /// Name of the saved query variant.
    pub variant_name: String,
    /// Session slot the variant is bound to.
    pub slot: usize,
    /// Position in the dispatch order (log display only).
    pub index: usize,
}

impl VariantCtx {
    pub fn new(variant_name: impl Into<String>, slot: usize, index: usize) -> Self {
        Self {
            variant_name: variant_name.into(),
            slot,
            index,
        }
    }
}

impl Display for VariantCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[variant {} @slot {}]", self.variant_name, self.slot)
    }
}
