//! HTTP client for the local GUI scripting bridge.
//!
//! The automation host exposes its scripting tree through a small bridge
//! process listening on localhost; we attach to it by port the same way a
//! debugger attaches to a running browser. Every [`GuiSession`] primitive
//! maps to one `invoke` call against the bound session.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use tracing::{debug, info};

use crate::error::SessionError;
use crate::infrastructure::gui_session::{
    GuiSession, SessionProvider, StatusBarMessage, TableDims,
};

#[derive(Debug, Serialize)]
struct InvokeRequest<'a> {
    op: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    args: Vec<JsonValue>,
}

#[derive(Debug, Deserialize)]
struct InvokeResponse {
    ok: bool,
    #[serde(default)]
    value: JsonValue,
    #[serde(default)]
    error: Option<String>,
}

/// Client for the bridge process; doubles as the session provider.
pub struct BridgeClient {
    http: reqwest::Client,
    base_url: String,
}

impl BridgeClient {
    pub fn new(port: u16) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: format!("http://localhost:{port}"),
        }
    }

    /// Verifies the bridge is up. Used as the startup probe.
    pub async fn ping(&self) -> Result<(), SessionError> {
        let url = format!("{}/health", self.base_url);
        debug!("probing scripting bridge at {url}");
        self.http
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|source| SessionError::Transport {
                op: "health".to_string(),
                source,
            })?;
        Ok(())
    }
}

#[async_trait]
impl SessionProvider for BridgeClient {
    async fn attach(&self, slot: usize) -> Result<Box<dyn GuiSession>, SessionError> {
        let url = format!("{}/sessions/{slot}/attach", self.base_url);
        let response = self
            .http
            .post(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|source| SessionError::Transport {
                op: "attach".to_string(),
                source,
            })?;
        let body: InvokeResponse =
            response
                .json()
                .await
                .map_err(|source| SessionError::Transport {
                    op: "attach".to_string(),
                    source,
                })?;
        if !body.ok {
            return Err(SessionError::Rejected {
                op: "attach".to_string(),
                message: body.error.unwrap_or_else(|| "unknown".to_string()),
            });
        }
        info!("✓ attached to session slot {slot}");
        Ok(Box::new(BridgeSession {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            slot,
        }))
    }
}

/// One bound session, driven through the bridge.
pub struct BridgeSession {
    http: reqwest::Client,
    base_url: String,
    slot: usize,
}

impl BridgeSession {
    async fn invoke(
        &self,
        op: &str,
        id: Option<&str>,
        args: Vec<JsonValue>,
    ) -> Result<JsonValue, SessionError> {
        let url = format!("{}/sessions/{}/invoke", self.base_url, self.slot);
        let request = InvokeRequest { op, id, args };
        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|source| SessionError::Transport {
                op: op.to_string(),
                source,
            })?;
        let body: InvokeResponse =
            response
                .json()
                .await
                .map_err(|source| SessionError::Transport {
                    op: op.to_string(),
                    source,
                })?;
        if !body.ok {
            return Err(SessionError::Rejected {
                op: op.to_string(),
                message: body.error.unwrap_or_else(|| "unknown".to_string()),
            });
        }
        Ok(body.value)
    }

    fn decode<T: serde::de::DeserializeOwned>(
        op: &str,
        value: JsonValue,
    ) -> Result<T, SessionError> {
        serde_json::from_value(value).map_err(|source| SessionError::Decode {
            op: op.to_string(),
            source,
        })
    }
}

#[async_trait]
impl GuiSession for BridgeSession {
    fn slot(&self) -> usize {
        self.slot
    }

    async fn set_text(&self, id: &str, value: &str) -> Result<(), SessionError> {
        self.invoke("set_text", Some(id), vec![json!(value)]).await?;
        Ok(())
    }

    async fn press(&self, id: &str) -> Result<(), SessionError> {
        self.invoke("press", Some(id), vec![]).await?;
        Ok(())
    }

    async fn send_vkey(&self, key: u8) -> Result<(), SessionError> {
        self.invoke("send_vkey", None, vec![json!(key)]).await?;
        Ok(())
    }

    async fn popup_text(&self) -> Result<Option<String>, SessionError> {
        let value = self.invoke("popup_text", None, vec![]).await?;
        Self::decode("popup_text", value)
    }

    async fn status_bar(&self) -> Result<Option<StatusBarMessage>, SessionError> {
        let value = self.invoke("status_bar", None, vec![]).await?;
        Self::decode("status_bar", value)
    }

    async fn table_dims(&self, id: &str) -> Result<TableDims, SessionError> {
        let value = self.invoke("table_dims", Some(id), vec![]).await?;
        Self::decode("table_dims", value)
    }

    async fn scroll_to_row(&self, id: &str, first_row: usize) -> Result<(), SessionError> {
        self.invoke("scroll_to_row", Some(id), vec![json!(first_row)])
            .await?;
        Ok(())
    }

    async fn cell_value(
        &self,
        id: &str,
        row: usize,
        column: &str,
    ) -> Result<String, SessionError> {
        let value = self
            .invoke("cell_value", Some(id), vec![json!(row), json!(column)])
            .await?;
        Self::decode("cell_value", value)
    }

    async fn select_rows(&self, id: &str, rows: &[usize]) -> Result<(), SessionError> {
        self.invoke("select_rows", Some(id), vec![json!(rows)]).await?;
        Ok(())
    }

    async fn set_scrollbar(&self, id: &str, position: usize) -> Result<(), SessionError> {
        self.invoke("set_scrollbar", Some(id), vec![json!(position)])
            .await?;
        Ok(())
    }
}
