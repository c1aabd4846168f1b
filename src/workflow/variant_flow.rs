//! Variant processing flow — workflow layer.
//!
//! Defines the complete end-to-end handling of one query variant on one
//! bound session: load, detect empty result, extract, classify, convert,
//! reset, capture the status message. Holds no resources; the session comes
//! in as a lease from the orchestration layer.

use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::GuiSession;
use crate::models::order::{ColumnTable, OrderRow};
use crate::models::outcome::VariantOutcome;
use crate::services::classifier;
use crate::services::order_list;
use crate::workflow::variant_ctx::VariantCtx;

/// Runs one variant end-to-end and emits one [`VariantOutcome`].
pub struct VariantWorker {
    transaction: String,
    conversion_profile: u32,
    verbose_logging: bool,
}

impl VariantWorker {
    pub fn new(config: &Config) -> Self {
        Self {
            transaction: config.transaction.clone(),
            conversion_profile: config.conversion_profile,
            verbose_logging: config.verbose_logging,
        }
    }

    /// Supervised entry point: every dispatched variant yields exactly one
    /// outcome. A failing session turns into a `Failed` outcome instead of
    /// vanishing from the aggregate report.
    pub async fn run_supervised(&self, session: &dyn GuiSession, ctx: &VariantCtx) -> VariantOutcome {
        match self.run(session, ctx).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("{ctx} ❌ worker failed: {e}");
                VariantOutcome::failed(&ctx.variant_name, e.to_string())
            }
        }
    }

    /// The flow itself. Session errors propagate to [`Self::run_supervised`].
    pub async fn run(&self, session: &dyn GuiSession, ctx: &VariantCtx) -> AppResult<VariantOutcome> {
        info!("{ctx} 🔍 loading variant");
        order_list::open_transaction(session, &self.transaction).await?;
        order_list::load_variant(session, &ctx.variant_name, false).await?;
        order_list::clear_warning(session).await?;

        if order_list::take_no_data_popup(session).await? {
            info!("{ctx} ∅ query returned no rows");
            order_list::reset_transaction(session).await?;
            return Ok(VariantOutcome::no_data(&ctx.variant_name));
        }

        let columns = order_list::read_order_table(session).await?;
        let rows = OrderRow::rows_from_columns(&columns)?;
        info!("{ctx} ✓ extracted {} rows", rows.len());

        let (selected, skipped, selected_indices) = self.partition(ctx, &rows);

        if !selected_indices.is_empty() {
            info!(
                "{ctx} ⚙ converting {} of {} rows (profile {})",
                selected_indices.len(),
                rows.len(),
                self.conversion_profile
            );
            order_list::run_mass_conversion(session, &selected_indices, self.conversion_profile)
                .await?;
        }

        // Read the message before the reset wipes the status bar.
        let message = order_list::status_message(session).await;
        order_list::reset_transaction(session).await?;

        Ok(VariantOutcome::processed(
            &ctx.variant_name,
            selected,
            skipped,
            message,
        ))
    }

    /// Classifies every row, keeping grid order within both partitions.
    /// Returns the selected and skipped tables plus the grid indices of the
    /// selected rows for the conversion call.
    fn partition(
        &self,
        ctx: &VariantCtx,
        rows: &[OrderRow],
    ) -> (ColumnTable, ColumnTable, Vec<usize>) {
        let mut selected = ColumnTable::new();
        let mut skipped = ColumnTable::new();
        let mut selected_indices = Vec::new();

        for (index, row) in rows.iter().enumerate() {
            let result = classifier::classify_row(row);
            if self.verbose_logging {
                debug!(
                    "{ctx} order {}: convert={} (planner={} gate={} marker={})",
                    row.order_id,
                    result.should_convert,
                    result.no_special_planner_stock,
                    result.stock_or_configured,
                    result.marker_quantity_ok
                );
            }
            if result.should_convert {
                selected.push_row(row);
                selected_indices.push(index);
            } else {
                skipped.push_row(row);
            }
        }

        (selected, skipped, selected_indices)
    }
}
