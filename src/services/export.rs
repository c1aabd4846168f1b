//! CSV export of the aggregated tables — capability layer.
//!
//! Writes one file per table, named by the run date, into the configured
//! export directory.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::error::{AppResult, FileError};
use crate::models::order::{ColumnTable, ORDER_COLUMNS};
use crate::models::outcome::AggregateReport;

/// Writes run exports into one directory.
pub struct CsvExporter {
    export_dir: PathBuf,
}

impl CsvExporter {
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
        }
    }

    /// Writes the converted and skipped tables; returns both file paths.
    pub fn write_report(
        &self,
        report: &AggregateReport,
        run_date: NaiveDate,
    ) -> AppResult<(PathBuf, PathBuf)> {
        let converted = self.write_table("converted", run_date, &report.converted)?;
        let skipped = self.write_table("skipped", run_date, &report.skipped)?;
        Ok((converted, skipped))
    }

    /// Writes one table as `<prefix>_<YYYY-MM-DD>.csv` with the fixed schema
    /// as header row.
    pub fn write_table(
        &self,
        prefix: &str,
        run_date: NaiveDate,
        table: &ColumnTable,
    ) -> AppResult<PathBuf> {
        std::fs::create_dir_all(&self.export_dir)
            .map_err(|e| FileError::write(self.export_dir.display().to_string(), e))?;
        let path = self
            .export_dir
            .join(format!("{prefix}_{}.csv", run_date.format("%Y-%m-%d")));

        write_csv(&path, table).map_err(|source| FileError::Csv {
            path: path.display().to_string(),
            source,
        })?;

        info!("📄 exported {} rows to {}", table.row_count(), path.display());
        Ok(path)
    }
}

fn write_csv(path: &Path, table: &ColumnTable) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(ORDER_COLUMNS)?;
    for row in table.rows() {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}
