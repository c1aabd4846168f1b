//! End-to-end pipeline over scripted sessions: dispatch → aggregate →
//! export → reload → status entry.

mod common;

use std::sync::Arc;

use cohv_mass_convert::infrastructure::SessionPool;
use cohv_mass_convert::models::order::COL_ORDER;
use cohv_mass_convert::models::outcome::{OutcomeStatus, NO_DATA_MESSAGE};
use cohv_mass_convert::orchestrator::{aggregate, App, DispatchPool};
use cohv_mass_convert::services::FileStatusSink;
use cohv_mass_convert::workflow::VariantWorker;
use cohv_mass_convert::{Config, GuiSession};

use common::{FakeSession, GridRow};

const CONVERTIBLE_A: GridRow = GridRow {
    order_id: "1000001",
    material_id: "991234",
    material_text: "FRAME 9H LEFT",
    quantity: "1",
    stock: "0",
    planner: "101",
};

const SKIPPED_A: GridRow = GridRow {
    order_id: "1000002",
    material_id: "501234",
    material_text: "PANEL PLAIN",
    quantity: "3",
    stock: "25",
    planner: "101",
};

const CONVERTIBLE_C: GridRow = GridRow {
    order_id: "2000001",
    material_id: "995555",
    material_text: "COVER",
    quantity: "4",
    stock: "0",
    planner: "101",
};

fn three_variant_config() -> Config {
    Config {
        variants: vec!["VAR_A".to_string(), "VAR_B".to_string(), "VAR_C".to_string()],
        ..Config::default()
    }
}

/// Slot 0 serves variant A, slot 1 variant B (no data), slot 2 variant C.
fn three_variant_sessions() -> Vec<Box<dyn GuiSession>> {
    vec![
        Box::new(
            FakeSession::new(0)
                .with_rows(&[CONVERTIBLE_A, SKIPPED_A])
                .with_status("orders converted"),
        ),
        Box::new(FakeSession::new(1).reporting_no_data()),
        Box::new(FakeSession::new(2).with_rows(&[CONVERTIBLE_C])),
    ]
}

#[tokio::test]
async fn three_variant_run_aggregates_as_expected() {
    let config = three_variant_config();
    let pool = Arc::new(SessionPool::from_sessions(three_variant_sessions()));
    let dispatcher = DispatchPool::new(pool, VariantWorker::new(&config));

    let outcomes = dispatcher.dispatch(&config.variants).await;
    assert_eq!(outcomes.len(), 3);

    let report = aggregate(outcomes);
    assert_eq!(report.converted.row_count(), 2);
    assert_eq!(report.skipped.row_count(), 1);
    assert!(report.converted.is_rectangular());
    assert!(report.skipped.is_rectangular());

    assert_eq!(report.messages.len(), 3);
    assert_eq!(report.messages["VAR_B"], NO_DATA_MESSAGE);
    assert_eq!(report.messages["VAR_A"], "orders converted");

    let mut converted: Vec<_> = report.converted.column(COL_ORDER).to_vec();
    converted.sort();
    assert_eq!(converted, ["1000001", "2000001"]);
    assert_eq!(report.skipped.column(COL_ORDER), ["1000002"]);
}

#[tokio::test]
async fn more_variants_than_slots_still_yield_one_outcome_each() {
    let config = three_variant_config();
    let session = FakeSession::new(0).with_rows(&[CONVERTIBLE_A, SKIPPED_A]);
    let pool = Arc::new(SessionPool::from_sessions(vec![Box::new(session)]));
    let dispatcher = DispatchPool::new(pool, VariantWorker::new(&config));

    let outcomes = dispatcher.dispatch(&config.variants).await;

    assert_eq!(outcomes.len(), 3);
    let mut names: Vec<_> = outcomes.iter().map(|o| o.variant_name.clone()).collect();
    names.sort();
    assert_eq!(names, ["VAR_A", "VAR_B", "VAR_C"]);
    assert!(outcomes.iter().all(|o| o.status == OutcomeStatus::Processed));
}

#[tokio::test]
async fn failing_session_yields_failed_outcomes_not_lost_variants() {
    let config = three_variant_config();
    let session = FakeSession::new(0).failing_on("set_text");
    let pool = Arc::new(SessionPool::from_sessions(vec![Box::new(session)]));
    let dispatcher = DispatchPool::new(pool, VariantWorker::new(&config));

    let outcomes = dispatcher.dispatch(&config.variants).await;

    assert_eq!(outcomes.len(), 3);
    for outcome in &outcomes {
        assert!(matches!(outcome.status, OutcomeStatus::Failed(_)));
    }

    // Failed variants still carry an attachable message.
    let report = aggregate(outcomes);
    assert_eq!(report.total_rows(), 0);
    assert_eq!(report.messages.len(), 3);
    assert!(report.messages["VAR_A"].contains("scripted failure"));
}

#[tokio::test]
async fn full_run_exports_and_leaves_one_status_entry() {
    let dir = tempfile::tempdir().unwrap();
    let status_path = dir.path().join("status.jsonl");
    let config = Config {
        export_dir: dir.path().join("exports").display().to_string(),
        status_log_file: status_path.display().to_string(),
        ..three_variant_config()
    };

    let session_a = FakeSession::new(0)
        .with_rows(&[CONVERTIBLE_A, SKIPPED_A])
        .with_status("orders converted");
    let slot0_calls = session_a.calls_handle();
    let sessions: Vec<Box<dyn GuiSession>> = vec![
        Box::new(session_a),
        Box::new(FakeSession::new(1).reporting_no_data()),
        Box::new(FakeSession::new(2).with_rows(&[CONVERTIBLE_C])),
    ];
    let pool = Arc::new(SessionPool::from_sessions(sessions));
    let sink = Arc::new(FileStatusSink::new(&status_path));

    let app = App::from_parts(config, pool, sink);
    app.run().await.unwrap();

    // One status entry with the run counts.
    let content = std::fs::read_to_string(&status_path).unwrap();
    assert_eq!(content.lines().count(), 1);
    let entry: serde_json::Value = serde_json::from_str(content.lines().next().unwrap()).unwrap();
    assert_eq!(entry["fields"]["converted_rows"], 2);
    assert_eq!(entry["fields"]["skipped_rows"], 1);
    assert_eq!(entry["fields"]["no_data_variants"][0], "VAR_B");
    assert!(!entry["run_started"].as_str().unwrap().is_empty());

    // Both exports exist and carry the header plus their rows.
    let converted_export = entry["fields"]["converted_export"].as_str().unwrap();
    let converted = std::fs::read_to_string(converted_export).unwrap();
    assert_eq!(converted.lines().count(), 3);
    let skipped_export = entry["fields"]["skipped_export"].as_str().unwrap();
    let skipped = std::fs::read_to_string(skipped_export).unwrap();
    assert!(skipped.contains("1000002"));

    // The skipped order was staged for the next cycle on slot 0.
    let calls = slot0_calls.lock().unwrap();
    assert!(calls.iter().any(|c| c.contains("SLOW_I[1,1]=1000002")));
}
