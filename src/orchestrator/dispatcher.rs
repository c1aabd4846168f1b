//! Variant dispatcher — orchestration layer.
//!
//! Fans the variant list out across the session pool: one tokio task per
//! variant, slots assigned round-robin, outcomes merged through a single
//! many-producer channel, then a full join barrier. Variants that share a
//! slot serialize on its lease.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::infrastructure::SessionPool;
use crate::models::outcome::VariantOutcome;
use crate::workflow::{VariantCtx, VariantWorker};

/// Dispatches variants across the pool and collects their outcomes.
pub struct DispatchPool {
    pool: Arc<SessionPool>,
    worker: Arc<VariantWorker>,
}

impl DispatchPool {
    pub fn new(pool: Arc<SessionPool>, worker: VariantWorker) -> Self {
        Self {
            pool,
            worker: Arc::new(worker),
        }
    }

    /// Runs every variant concurrently and waits for all of them.
    ///
    /// Exactly one outcome comes back per dispatched variant: worker errors
    /// surface as `Failed` outcomes via the supervising wrapper, and a
    /// panicked task is synthesized into one here. Arrival order is
    /// whatever order workers finish in.
    pub async fn dispatch(&self, variants: &[String]) -> Vec<VariantOutcome> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut units = Vec::with_capacity(variants.len());

        for (index, variant) in variants.iter().enumerate() {
            let slot = index % self.pool.len().max(1);
            let ctx = VariantCtx::new(variant, slot, index);
            let pool = self.pool.clone();
            let worker = self.worker.clone();
            let tx = tx.clone();

            let handle = tokio::spawn(async move {
                let lease = pool.lease(ctx.slot).await;
                let outcome = worker.run_supervised(&*lease, &ctx).await;
                // The receiver outlives every sender; a send can only fail
                // if dispatch itself was dropped.
                let _ = tx.send(outcome);
            });
            units.push(handle);
        }
        drop(tx);

        info!(
            "📦 dispatched {} variants over {} session slots",
            variants.len(),
            self.pool.len()
        );

        let mut outcomes = Vec::with_capacity(variants.len());
        for (variant, result) in variants.iter().zip(join_all(units).await) {
            if let Err(join_error) = result {
                error!("[variant {variant}] task aborted: {join_error}");
                outcomes.push(VariantOutcome::failed(
                    variant,
                    format!("worker task aborted: {join_error}"),
                ));
            }
        }
        while let Some(outcome) = rx.recv().await {
            outcomes.push(outcome);
        }
        outcomes
    }
}
