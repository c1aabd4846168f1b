//! Scripted in-memory session for driving the flow without a real bridge.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use cohv_mass_convert::error::SessionError;
use cohv_mass_convert::infrastructure::{GuiSession, StatusBarMessage, TableDims};
use cohv_mass_convert::models::order::{
    COL_MATERIAL, COL_MATERIAL_TEXT, COL_ORDER, COL_PLANNER_GROUP, COL_QUANTITY,
    COL_SALES_ORDER, COL_SALES_ORDER_ITEM, COL_START_DATE, COL_STOCK,
};

/// One scripted grid row: (order, material, text, quantity, stock, planner).
pub struct GridRow {
    pub order_id: &'static str,
    pub material_id: &'static str,
    pub material_text: &'static str,
    pub quantity: &'static str,
    pub stock: &'static str,
    pub planner: &'static str,
}

/// Builds the column-oriented grid data the fake session serves.
pub fn grid(rows: &[GridRow]) -> BTreeMap<String, Vec<String>> {
    let mut columns: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for row in rows {
        columns.entry(COL_ORDER.into()).or_default().push(row.order_id.into());
        columns.entry(COL_SALES_ORDER.into()).or_default().push("".into());
        columns.entry(COL_SALES_ORDER_ITEM.into()).or_default().push("".into());
        columns.entry(COL_MATERIAL.into()).or_default().push(row.material_id.into());
        columns
            .entry(COL_MATERIAL_TEXT.into())
            .or_default()
            .push(row.material_text.into());
        columns.entry(COL_QUANTITY.into()).or_default().push(row.quantity.into());
        columns
            .entry(COL_START_DATE.into())
            .or_default()
            .push("14.07.2025".into());
        columns.entry(COL_STOCK.into()).or_default().push(row.stock.into());
        columns
            .entry(COL_PLANNER_GROUP.into())
            .or_default()
            .push(row.planner.into());
    }
    columns
}

/// Scripted session: serves fixed grid data and records every driving call.
pub struct FakeSession {
    slot: usize,
    columns: BTreeMap<String, Vec<String>>,
    no_data: bool,
    visible_rows: usize,
    status_text: Option<String>,
    fail_op: Option<&'static str>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeSession {
    pub fn new(slot: usize) -> Self {
        Self {
            slot,
            columns: BTreeMap::new(),
            no_data: false,
            visible_rows: 2,
            status_text: None,
            fail_op: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_rows(mut self, rows: &[GridRow]) -> Self {
        self.columns = grid(rows);
        self
    }

    pub fn with_columns(mut self, columns: BTreeMap<String, Vec<String>>) -> Self {
        self.columns = columns;
        self
    }

    pub fn reporting_no_data(mut self) -> Self {
        self.no_data = true;
        self
    }

    pub fn with_status(mut self, text: &str) -> Self {
        self.status_text = Some(text.to_string());
        self
    }

    /// Makes the named op fail, simulating a scripting host error.
    pub fn failing_on(mut self, op: &'static str) -> Self {
        self.fail_op = Some(op);
        self
    }

    /// Handle onto the call log, valid after the session moved into a pool.
    pub fn calls_handle(&self) -> Arc<Mutex<Vec<String>>> {
        self.calls.clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, op: &str, detail: String) -> Result<(), SessionError> {
        self.calls.lock().unwrap().push(detail);
        if self.fail_op == Some(op) {
            return Err(SessionError::Rejected {
                op: op.to_string(),
                message: "scripted failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl GuiSession for FakeSession {
    fn slot(&self) -> usize {
        self.slot
    }

    async fn set_text(&self, id: &str, value: &str) -> Result<(), SessionError> {
        self.record("set_text", format!("set_text:{id}={value}"))
    }

    async fn press(&self, id: &str) -> Result<(), SessionError> {
        self.record("press", format!("press:{id}"))
    }

    async fn send_vkey(&self, key: u8) -> Result<(), SessionError> {
        self.record("send_vkey", format!("vkey:{key}"))
    }

    async fn popup_text(&self) -> Result<Option<String>, SessionError> {
        self.record("popup_text", "popup_text".to_string())?;
        Ok(self
            .no_data
            .then(|| "No data exists for the selection".to_string()))
    }

    async fn status_bar(&self) -> Result<Option<StatusBarMessage>, SessionError> {
        self.record("status_bar", "status_bar".to_string())?;
        Ok(self.status_text.as_ref().map(|text| StatusBarMessage {
            message_type: "S".to_string(),
            text: text.clone(),
        }))
    }

    async fn table_dims(&self, id: &str) -> Result<TableDims, SessionError> {
        self.record("table_dims", format!("table_dims:{id}"))?;
        let row_count = self
            .columns
            .values()
            .next()
            .map(Vec::len)
            .unwrap_or_default();
        Ok(TableDims {
            row_count,
            visible_rows: self.visible_rows,
        })
    }

    async fn scroll_to_row(&self, id: &str, first_row: usize) -> Result<(), SessionError> {
        self.record("scroll_to_row", format!("scroll:{id}@{first_row}"))
    }

    async fn cell_value(
        &self,
        _id: &str,
        row: usize,
        column: &str,
    ) -> Result<String, SessionError> {
        self.record("cell_value", format!("cell:{column}[{row}]"))?;
        let values = self
            .columns
            .get(column)
            .ok_or_else(|| SessionError::Rejected {
                op: "cell_value".to_string(),
                message: format!("unknown column {column}"),
            })?;
        Ok(values.get(row).cloned().unwrap_or_default())
    }

    async fn select_rows(&self, id: &str, rows: &[usize]) -> Result<(), SessionError> {
        self.record("select_rows", format!("select:{id}:{rows:?}"))
    }

    async fn set_scrollbar(&self, id: &str, position: usize) -> Result<(), SessionError> {
        self.record("set_scrollbar", format!("scrollbar:{id}@{position}"))
    }
}
