//! # COHV Mass Convert
//!
//! Automates the recurring production-order triage run: pulls order rows
//! from the mass-processing transaction per saved query variant, classifies
//! each row as convert or skip, triggers the bulk conversion for the
//! qualifying rows, and records the outcome to the shared status log.
//!
//! ## Architecture
//!
//! Four strict layers:
//!
//! ### ① Infrastructure
//! - `infrastructure/` — owns the scarce resource (bound GUI sessions)
//! - `GuiSession` — low-level scripting primitives, one trait
//! - `BridgeClient`/`BridgeSession` — HTTP bridge to the scripting host
//! - `SessionPool` — fixed slots, exclusive leases
//!
//! ### ② Services
//! - `services/` — single capabilities, no flow knowledge
//! - `classifier` — the convert/skip decision rule (pure)
//! - `order_list` — the transaction verbs (load variant, extract, convert)
//! - `export` — CSV exports named by run date
//! - `status_sink` — append-only shared status log
//!
//! ### ③ Workflow
//! - `workflow/` — one variant end-to-end
//! - `VariantWorker` — load → classify → convert → reset, one outcome
//! - `ReloadStage` — stage skipped orders for the next cycle
//!
//! ### ④ Orchestration
//! - `orchestrator/` — fan-out, join barrier, aggregation, run lifecycle
//!
//! ## Layering
//!
//! ```text
//! orchestrator (Vec<variant>)
//!     ↓
//! workflow (one variant)
//!     ↓
//! services (one capability)
//!     ↓
//! infrastructure (one session)
//! ```

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// Re-export the common types.
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{BridgeClient, GuiSession, SessionPool};
pub use models::{AggregateReport, ColumnTable, OrderRow, OutcomeStatus, VariantOutcome};
pub use orchestrator::{aggregate, App, DispatchPool};
pub use services::{classify, ClassificationFactors, ClassificationResult};
pub use workflow::{ReloadStage, VariantCtx, VariantWorker};
