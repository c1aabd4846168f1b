//! Batch run processor — orchestration layer.
//!
//! Owns the run lifecycle: attach the session pool, dispatch all variants,
//! aggregate, export, stage the skipped orders for the next cycle, and
//! leave exactly one status entry — success or failure — keyed by the run
//! start and end timestamps.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Local};
use serde_json::json;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{BridgeClient, SessionPool};
use crate::models::order::COL_ORDER;
use crate::models::outcome::{AggregateReport, OutcomeStatus};
use crate::orchestrator::{aggregator, DispatchPool};
use crate::services::{CsvExporter, FileStatusSink, StatusEntry, StatusSink};
use crate::utils::logging;
use crate::workflow::{ReloadStage, VariantWorker};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Application main structure.
pub struct App {
    config: Config,
    pool: Arc<SessionPool>,
    status_sink: Arc<dyn StatusSink>,
}

/// What one finished run produced.
pub struct RunSummary {
    pub report: AggregateReport,
    pub no_data_variants: Vec<String>,
    pub failed_variants: Vec<String>,
    pub converted_export: PathBuf,
    pub skipped_export: PathBuf,
    pub reload_error: Option<String>,
}

impl App {
    /// Attaches the session pool through the scripting bridge. A slot not
    /// ready within the startup timeout aborts the run before any variant
    /// is touched.
    pub async fn initialize(config: Config) -> Result<Self> {
        config.validate()?;
        logging::log_startup(&config);

        let bridge = BridgeClient::new(config.bridge_port);
        bridge.ping().await?;

        // Never attach more sessions than there are variants to serve.
        let slots = config.max_sessions.min(config.variants.len()).max(1);
        let pool = SessionPool::connect(
            &bridge,
            slots,
            Duration::from_secs(config.startup_timeout_secs),
        )
        .await?;

        let status_sink = Arc::new(FileStatusSink::new(&config.status_log_file));
        Ok(Self::from_parts(config, Arc::new(pool), status_sink))
    }

    /// Assembles an app from pre-built parts. Seam for tests and alternate
    /// sinks.
    pub fn from_parts(
        config: Config,
        pool: Arc<SessionPool>,
        status_sink: Arc<dyn StatusSink>,
    ) -> Self {
        Self {
            config,
            pool,
            status_sink,
        }
    }

    /// Runs the whole batch. Whatever happens, one status entry is appended
    /// before the result propagates.
    pub async fn run(&self) -> Result<()> {
        let started = Local::now();
        let result = self.execute().await;
        let finished = Local::now();

        let entry = match &result {
            Ok(summary) => self.status_entry(started, finished, summary),
            Err(e) => self.failure_entry(started, finished, &e.to_string()),
        };
        if let Err(sink_error) = self.status_sink.append(&entry).await {
            error!("could not append status entry: {sink_error}");
        }

        let summary = result?;
        logging::log_final_stats(
            &self.config,
            summary.report.converted.row_count(),
            summary.report.skipped.row_count(),
            summary.no_data_variants.len(),
            summary.failed_variants.len(),
        );
        Ok(())
    }

    async fn execute(&self) -> AppResult<RunSummary> {
        let dispatcher = DispatchPool::new(self.pool.clone(), VariantWorker::new(&self.config));
        let outcomes = dispatcher.dispatch(&self.config.variants).await;

        let mut no_data_variants = Vec::new();
        let mut failed_variants = Vec::new();
        for outcome in &outcomes {
            match &outcome.status {
                OutcomeStatus::NoData => no_data_variants.push(outcome.variant_name.clone()),
                OutcomeStatus::Failed(_) => failed_variants.push(outcome.variant_name.clone()),
                OutcomeStatus::Processed => {}
            }
        }
        if !failed_variants.is_empty() {
            warn!("⚠️ {} variants failed this run", failed_variants.len());
        }

        let report = aggregator::aggregate(outcomes);
        info!(
            "📊 aggregated: {} to convert, {} skipped, {} messages",
            report.converted.row_count(),
            report.skipped.row_count(),
            report.messages.len()
        );

        let exporter = CsvExporter::new(&self.config.export_dir);
        let (converted_export, skipped_export) =
            exporter.write_report(&report, Local::now().date_naive())?;

        // Stage the skipped orders on slot 0 for the next cycle. A reload
        // failure is recorded but does not undo the finished conversions.
        let skipped_ids = report.skipped.column(COL_ORDER).to_vec();
        let reload = ReloadStage::new(&self.config);
        let lease = self.pool.lease(0).await;
        let reload_error = match reload
            .reload(&*lease, &self.config.reload_variant, &skipped_ids)
            .await
        {
            Ok(()) => None,
            Err(e) => {
                error!("reload stage failed: {e}");
                Some(e.to_string())
            }
        };

        Ok(RunSummary {
            report,
            no_data_variants,
            failed_variants,
            converted_export,
            skipped_export,
            reload_error,
        })
    }

    fn status_entry(
        &self,
        started: DateTime<Local>,
        finished: DateTime<Local>,
        summary: &RunSummary,
    ) -> StatusEntry {
        let mut fields = BTreeMap::new();
        fields.insert(
            "converted_rows".to_string(),
            json!(summary.report.converted.row_count()),
        );
        fields.insert(
            "skipped_rows".to_string(),
            json!(summary.report.skipped.row_count()),
        );
        fields.insert(
            "variants_total".to_string(),
            json!(self.config.variants.len()),
        );
        fields.insert(
            "no_data_variants".to_string(),
            json!(summary.no_data_variants),
        );
        fields.insert("failed_variants".to_string(), json!(summary.failed_variants));
        fields.insert(
            "converted_export".to_string(),
            json!(summary.converted_export.display().to_string()),
        );
        fields.insert(
            "skipped_export".to_string(),
            json!(summary.skipped_export.display().to_string()),
        );
        fields.insert("messages".to_string(), json!(summary.report.messages));
        if let Some(reload_error) = &summary.reload_error {
            fields.insert("reload_error".to_string(), json!(reload_error));
        }
        self.entry_with_fields(started, finished, fields)
    }

    fn failure_entry(
        &self,
        started: DateTime<Local>,
        finished: DateTime<Local>,
        error: &str,
    ) -> StatusEntry {
        let mut fields = BTreeMap::new();
        fields.insert("error".to_string(), json!(error));
        self.entry_with_fields(started, finished, fields)
    }

    fn entry_with_fields(
        &self,
        started: DateTime<Local>,
        finished: DateTime<Local>,
        fields: BTreeMap<String, serde_json::Value>,
    ) -> StatusEntry {
        StatusEntry {
            category: self.config.status_category.clone(),
            run_started: started.format(TIMESTAMP_FORMAT).to_string(),
            run_finished: finished.format(TIMESTAMP_FORMAT).to_string(),
            fields,
            error_log: self.config.error_log_file.clone(),
        }
    }
}
