//! Order list transaction verbs — capability layer.
//!
//! Knows the control tree of the mass-processing transaction and nothing
//! else: each function is one self-contained verb over a [`GuiSession`].
//! No flow decisions live here.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::SessionError;
use crate::infrastructure::GuiSession;
use crate::models::order::ORDER_COLUMNS;

// ========== Control tree ==========

/// Command field of the main window.
pub const OKCODE_FIELD: &str = "wnd[0]/tbar[0]/okcd";
/// Variant name field of the variant pop-up.
pub const VARIANT_NAME_FIELD: &str = "wnd[1]/usr/txtV-LOW";
/// Created-by filter of the variant pop-up; cleared so foreign variants load.
pub const VARIANT_USER_FIELD: &str = "wnd[1]/usr/txtENAME-LOW";
/// Confirm button of modal pop-ups (variant pick, multi-selection copy).
pub const POPUP_CONFIRM_BTN: &str = "wnd[1]/tbar[0]/btn[8]";
/// The order list grid.
pub const ORDER_TABLE: &str = "wnd[0]/usr/cntlGRID1/shellcont/shell";
/// Mass-processing button of the result toolbar.
pub const MASS_PROCESS_BTN: &str = "wnd[0]/tbar[1]/btn[38]";
/// Function profile field of the mass-processing pop-up.
pub const CONVERSION_PROFILE_FIELD: &str = "wnd[1]/usr/ctxtMASSFUNC-PROFILE";
/// Multiple-selection button next to the order number filter.
pub const MULTI_SELECT_BTN: &str = "wnd[0]/usr/btn%_S_AUFNR_%_APP_%-VALU_PUSH";
/// Single-values table of the multiple-selection pop-up.
pub const MULTI_SELECT_TABLE: &str =
    "wnd[1]/usr/tabsTAB_STRIP/tabpSIVA/ssubSCREEN_HEADER:SAPLALDB:3010/tblSAPLALDBSINGLE";
/// MRP controller filter on the selection screen.
pub const PLANNER_FILTER_FIELD: &str = "wnd[0]/usr/ctxtS_DISPO-LOW";
/// Basic start date filter on the selection screen.
pub const START_DATE_FILTER_FIELD: &str = "wnd[0]/usr/ctxtS_GSTRP-LOW";
/// Rescheduling date filter on the selection screen.
pub const RESCHEDULE_DATE_FILTER_FIELD: &str = "wnd[0]/usr/ctxtS_UMTRM-LOW";

/// Enter.
pub const VKEY_ENTER: u8 = 0;
/// F8 — execute.
pub const VKEY_EXECUTE: u8 = 8;
/// Shift+F5 — open the variant pop-up.
pub const VKEY_VARIANT_DIALOG: u8 = 17;

// ========== Verbs ==========

/// Opens a transaction fresh via the command field (`/n` prefix).
pub async fn open_transaction(session: &dyn GuiSession, code: &str) -> Result<(), SessionError> {
    session.set_text(OKCODE_FIELD, &format!("/n{code}")).await?;
    session.send_vkey(VKEY_ENTER).await
}

/// Returns the transaction context to the session manager.
pub async fn reset_transaction(session: &dyn GuiSession) -> Result<(), SessionError> {
    session.set_text(OKCODE_FIELD, "/n").await?;
    session.send_vkey(VKEY_ENTER).await
}

/// Loads a named variant through the variant pop-up. With `layout_only` the
/// variant is applied but the query is not executed.
pub async fn load_variant(
    session: &dyn GuiSession,
    variant_name: &str,
    layout_only: bool,
) -> Result<(), SessionError> {
    session.send_vkey(VKEY_VARIANT_DIALOG).await?;
    session.set_text(VARIANT_NAME_FIELD, variant_name).await?;
    session.set_text(VARIANT_USER_FIELD, "").await?;
    session.press(POPUP_CONFIRM_BTN).await?;

    if layout_only {
        return Ok(());
    }
    session.send_vkey(VKEY_EXECUTE).await
}

/// Detects the transient "no data" pop-up after executing a query. When
/// present it is acknowledged with Enter and `true` is returned.
pub async fn take_no_data_popup(session: &dyn GuiSession) -> Result<bool, SessionError> {
    match session.popup_text().await? {
        Some(text) => {
            debug!(slot = session.slot(), "acknowledging pop-up: {text}");
            session.send_vkey(VKEY_ENTER).await?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Acknowledges a pending status-bar warning so it does not block input.
pub async fn clear_warning(session: &dyn GuiSession) -> Result<(), SessionError> {
    if let Some(message) = session.status_bar().await? {
        if message.is_warning() {
            debug!(slot = session.slot(), "clearing warning: {}", message.text);
            session.send_vkey(VKEY_ENTER).await?;
        }
    }
    Ok(())
}

/// Status-bar text, or `None` when it cannot be read. Deliberately swallows
/// read failures: a missing message must never fail a finished variant.
pub async fn status_message(session: &dyn GuiSession) -> Option<String> {
    match session.status_bar().await {
        Ok(message) => message.map(|m| m.text),
        Err(e) => {
            warn!(slot = session.slot(), "could not read status bar: {e}");
            None
        }
    }
}

/// Reads the whole order grid into a column → values mapping, scrolling
/// page by page. The grid virtualizes rows, so only the currently visible
/// window can be read at a time.
pub async fn read_order_table(
    session: &dyn GuiSession,
) -> Result<BTreeMap<String, Vec<String>>, SessionError> {
    let dims = session.table_dims(ORDER_TABLE).await?;
    let mut values: BTreeMap<String, Vec<String>> = BTreeMap::new();

    let mut current_row = 0;
    while current_row < dims.row_count {
        session.scroll_to_row(ORDER_TABLE, current_row).await?;

        for offset in 0..dims.visible_rows {
            let row = current_row + offset;
            if row == dims.row_count {
                break;
            }
            for column in ORDER_COLUMNS {
                let value = session.cell_value(ORDER_TABLE, row, column).await?;
                values.entry(column.to_string()).or_default().push(value);
            }
        }
        current_row += dims.visible_rows;
    }

    debug!(
        slot = session.slot(),
        "extracted {} rows from the order grid", dims.row_count
    );
    Ok(values)
}

/// Selects the given grid rows and runs mass conversion with the numeric
/// function profile. The host either converts every selected row or leaves
/// a readable status message behind.
pub async fn run_mass_conversion(
    session: &dyn GuiSession,
    rows: &[usize],
    profile: u32,
) -> Result<(), SessionError> {
    session.select_rows(ORDER_TABLE, rows).await?;
    session.press(MASS_PROCESS_BTN).await?;
    session
        .set_text(CONVERSION_PROFILE_FIELD, &profile.to_string())
        .await?;
    session.press(POPUP_CONFIRM_BTN).await
}

/// Blanks the selection filters that would otherwise narrow a reload query.
pub async fn clear_selection_filters(session: &dyn GuiSession) -> Result<(), SessionError> {
    session.set_text(PLANNER_FILTER_FIELD, "").await?;
    session.set_text(START_DATE_FILTER_FIELD, "").await?;
    session.set_text(RESCHEDULE_DATE_FILTER_FIELD, "").await
}

/// Bulk-inserts order numbers into the multiple-selection pop-up, one
/// visible page at a time. The last visible line belongs to the next page,
/// so each pass fills `visible_rows - 1` cells before scrolling.
pub async fn insert_order_ids(
    session: &dyn GuiSession,
    order_ids: &[String],
) -> Result<(), SessionError> {
    session.press(MULTI_SELECT_BTN).await?;
    let dims = session.table_dims(MULTI_SELECT_TABLE).await?;
    let page = dims.visible_rows.saturating_sub(1).max(1);

    let mut current_row = 0;
    while current_row < order_ids.len() {
        let window = &order_ids[current_row..(current_row + page).min(order_ids.len())];
        for (line, order_id) in window.iter().enumerate() {
            let cell_id = format!("{MULTI_SELECT_TABLE}/ctxtRSCSEL_255-SLOW_I[1,{}]", line + 1);
            session.set_text(&cell_id, order_id).await?;
        }
        current_row += page;
        if current_row < order_ids.len() {
            session.set_scrollbar(MULTI_SELECT_TABLE, current_row).await?;
        }
    }
    session.press(POPUP_CONFIRM_BTN).await
}
