//! Reload stage — workflow layer.
//!
//! Stages the skipped orders of this run for the next cycle: re-opens the
//! transaction, applies the layout variant without executing, widens the
//! selection, and submits the skipped order numbers as an explicit
//! multi-selection.

use tracing::info;

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::GuiSession;
use crate::services::order_list;

/// Re-submits skipped order numbers into one session's query.
pub struct ReloadStage {
    transaction: String,
}

impl ReloadStage {
    pub fn new(config: &Config) -> Self {
        Self {
            transaction: config.transaction.clone(),
        }
    }

    /// No session interaction at all when `order_ids` is empty.
    pub async fn reload(
        &self,
        session: &dyn GuiSession,
        layout_variant: &str,
        order_ids: &[String],
    ) -> AppResult<()> {
        if order_ids.is_empty() {
            info!("↩ reload stage: nothing skipped, leaving session untouched");
            return Ok(());
        }

        info!(
            "↩ reload stage: staging {} skipped orders on slot {}",
            order_ids.len(),
            session.slot()
        );
        order_list::open_transaction(session, &self.transaction).await?;
        order_list::load_variant(session, layout_variant, true).await?;
        order_list::clear_selection_filters(session).await?;
        order_list::insert_order_ids(session, order_ids).await?;
        session.send_vkey(order_list::VKEY_EXECUTE).await?;
        Ok(())
    }
}
