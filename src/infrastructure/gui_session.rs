//! GUI scripting session — infrastructure layer.
//!
//! Owns the boundary to the external automation surface. The trait exposes
//! only the low-level scripting primitives (set text, press, virtual keys,
//! table cells, status bar); it knows nothing about variants, orders or the
//! conversion flow.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::SessionError;

/// Geometry of a scrollable table control.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TableDims {
    /// Total rows in the backing result set.
    pub row_count: usize,
    /// Rows rendered at once; reads beyond this require scrolling.
    pub visible_rows: usize,
}

/// One status-bar message. `message_type` uses the host's single-letter
/// codes ("S" success, "W" warning, "E" error).
#[derive(Debug, Clone, Deserialize)]
pub struct StatusBarMessage {
    pub message_type: String,
    pub text: String,
}

impl StatusBarMessage {
    pub fn is_warning(&self) -> bool {
        self.message_type == "W"
    }
}

/// Low-level driving primitives of one bound UI session.
///
/// Implementations must be safe to share behind a lease: the pool guarantees
/// that no two workers drive the same physical session at the same instant.
#[async_trait]
pub trait GuiSession: Send + Sync {
    /// Slot index this session is bound to (log context only).
    fn slot(&self) -> usize;

    /// Writes `value` into the control at `id`.
    async fn set_text(&self, id: &str, value: &str) -> Result<(), SessionError>;

    /// Presses the control at `id`.
    async fn press(&self, id: &str) -> Result<(), SessionError>;

    /// Sends a virtual key to the main window.
    async fn send_vkey(&self, key: u8) -> Result<(), SessionError>;

    /// Text of the modal pop-up window, if one is open.
    async fn popup_text(&self) -> Result<Option<String>, SessionError>;

    /// Current status-bar message, if any.
    async fn status_bar(&self) -> Result<Option<StatusBarMessage>, SessionError>;

    /// Geometry of the table control at `id`.
    async fn table_dims(&self, id: &str) -> Result<TableDims, SessionError>;

    /// Makes `first_row` the first visible row of the table at `id`.
    async fn scroll_to_row(&self, id: &str, first_row: usize) -> Result<(), SessionError>;

    /// Cell value at (`row`, `column`) of the table at `id`.
    async fn cell_value(&self, id: &str, row: usize, column: &str)
        -> Result<String, SessionError>;

    /// Marks the given absolute row indices of the table at `id` as selected.
    async fn select_rows(&self, id: &str, rows: &[usize]) -> Result<(), SessionError>;

    /// Moves the vertical scrollbar of the table at `id`.
    async fn set_scrollbar(&self, id: &str, position: usize) -> Result<(), SessionError>;
}

/// Yields bound, ready session handles for slot indices.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn attach(&self, slot: usize) -> Result<Box<dyn GuiSession>, SessionError>;
}
