//! Fixed pool of session slots with exclusive leases.
//!
//! Each slot wraps its session in an async mutex. Workers assigned to the
//! same slot therefore serialize instead of driving one physical session
//! concurrently; the lease releases on every exit path, including panics
//! unwinding a worker task.

use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::info;

use crate::error::{AppResult, SessionError};
use crate::infrastructure::gui_session::{GuiSession, SessionProvider};

type Slot = Arc<Mutex<Box<dyn GuiSession>>>;

/// Fixed set of bound sessions, indexed by slot.
pub struct SessionPool {
    slots: Vec<Slot>,
}

impl SessionPool {
    /// Attaches `count` sessions through the provider. Any slot not ready
    /// within `timeout` aborts the whole startup (nothing is processed).
    pub async fn connect(
        provider: &dyn SessionProvider,
        count: usize,
        timeout: Duration,
    ) -> AppResult<Self> {
        let mut slots = Vec::with_capacity(count);
        for slot in 0..count {
            let session = tokio::time::timeout(timeout, provider.attach(slot))
                .await
                .map_err(|_| SessionError::StartupTimeout {
                    slot,
                    timeout_secs: timeout.as_secs(),
                })??;
            slots.push(Arc::new(Mutex::new(session)));
        }
        info!("✓ session pool ready with {count} slots");
        Ok(Self { slots })
    }

    /// Builds a pool from already-bound sessions. Test seam.
    pub fn from_sessions(sessions: Vec<Box<dyn GuiSession>>) -> Self {
        Self {
            slots: sessions
                .into_iter()
                .map(|s| Arc::new(Mutex::new(s)))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Waits for exclusive use of the given slot. The lease frees the slot
    /// when dropped.
    pub async fn lease(&self, slot: usize) -> SessionLease {
        let guard = self.slots[slot % self.slots.len()]
            .clone()
            .lock_owned()
            .await;
        SessionLease { guard }
    }
}

/// Exclusive hold on one session slot.
pub struct SessionLease {
    guard: OwnedMutexGuard<Box<dyn GuiSession>>,
}

impl Deref for SessionLease {
    type Target = dyn GuiSession;

    fn deref(&self) -> &Self::Target {
        self.guard.as_ref()
    }
}
