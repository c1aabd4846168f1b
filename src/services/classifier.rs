//! Order classification — capability layer.
//!
//! The one piece of real business logic: decides per order row whether it is
//! converted this cycle or left for the next one. Pure functions only, so
//! the rule stays auditable and testable without a session.

use crate::models::order::OrderRow;

/// Material numbers of configurable materials start with this prefix.
pub const CONFIGURED_MATERIAL_PREFIX: &str = "99";
/// Marker in the material short text flagging the 9H frame family.
pub const MATERIAL_TEXT_MARKER: &str = "9H";
/// MRP controller code of the customer-service planner group.
pub const SPECIAL_PLANNER_GROUP: &str = "CSR";

/// Boolean facts derived from one order row. Pure function of the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationFactors {
    /// Stock is exactly zero. Negative stock counts as non-zero.
    pub stock_is_zero: bool,
    /// Order quantity is exactly one.
    pub quantity_is_one: bool,
    /// Material number starts with [`CONFIGURED_MATERIAL_PREFIX`].
    pub material_is_configured: bool,
    /// Material text contains [`MATERIAL_TEXT_MARKER`] (case-sensitive).
    pub text_contains_marker: bool,
    /// Planner group equals [`SPECIAL_PLANNER_GROUP`] exactly.
    pub planner_is_special: bool,
}

impl ClassificationFactors {
    pub fn from_row(row: &OrderRow) -> Self {
        Self {
            stock_is_zero: row.stock_level == 0,
            quantity_is_one: row.quantity == 1,
            material_is_configured: row.material_id.starts_with(CONFIGURED_MATERIAL_PREFIX),
            text_contains_marker: row.material_text.contains(MATERIAL_TEXT_MARKER),
            planner_is_special: row.planner_group == SPECIAL_PLANNER_GROUP,
        }
    }
}

/// Decision plus the three condition outcomes that produced it.
///
/// The intermediate booleans are kept on purpose: the rule must stay
/// explainable per row when planners question a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationResult {
    pub should_convert: bool,
    /// Condition 1: a special-planner order with stock on hand is never
    /// converted. `false` means it blocked the conversion.
    pub no_special_planner_stock: bool,
    /// Condition 2: only configured materials or zero-stock orders qualify.
    pub stock_or_configured: bool,
    /// Condition 3: a configured marker item with quantity above one is
    /// excluded even when conditions 1 and 2 hold.
    pub marker_quantity_ok: bool,
}

/// Classifies one row from its derived factors. All three conditions must
/// hold for a convert decision.
pub fn classify(factors: &ClassificationFactors) -> ClassificationResult {
    let no_special_planner_stock = !(factors.planner_is_special && !factors.stock_is_zero);
    let stock_or_configured = factors.material_is_configured || factors.stock_is_zero;
    let marker_quantity_ok = !(factors.text_contains_marker
        && factors.material_is_configured
        && !factors.quantity_is_one);

    ClassificationResult {
        should_convert: no_special_planner_stock && stock_or_configured && marker_quantity_ok,
        no_special_planner_stock,
        stock_or_configured,
        marker_quantity_ok,
    }
}

/// Classifies one row directly.
pub fn classify_row(row: &OrderRow) -> ClassificationResult {
    classify(&ClassificationFactors::from_row(row))
}
