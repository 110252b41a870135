//! Background task that evicts expired entries on a fixed interval.

use std::sync::{Mutex, Weak};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::cache::{sweep_expired, Store};
use crate::time::millis;

/// Owns the sweeper task and its shutdown signal.
///
/// The task only holds a `Weak` reference to the store, so it never keeps a
/// dropped cache alive. Dropping the `Sweeper` drops the sender, which also
/// stops the task.
#[derive(Debug)]
pub(super) struct Sweeper {
    shutdown_tx: watch::Sender<bool>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Sweeper {
    /// Spawns the sweeper on the current Tokio runtime.
    pub(super) fn spawn(store: Weak<Store>, interval: Duration) -> Self {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately
            ticker.tick().await;

            tracing::debug!(
                interval_ms = millis(interval),
                "Cache sweeper started"
            );

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let Some(store) = store.upgrade() else {
                            break;
                        };
                        let removed = sweep_expired(&store).await;
                        if removed > 0 {
                            tracing::debug!(removed, "Swept expired cache entries");
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }

            tracing::debug!("Cache sweeper stopped");
        });

        Self {
            shutdown_tx,
            handle: Mutex::new(Some(handle)),
        }
    }

    /// Signals the task to stop and waits for it to finish.
    ///
    /// Calling this more than once is a no-op.
    pub(super) async fn stop(&self) {
        let _ = self.shutdown_tx.send(true);

        let handle = self.handle.lock().ok().and_then(|mut guard| guard.take());
        if let Some(handle) = handle {
            if let Err(err) = handle.await {
                tracing::warn!(error = %err, "Cache sweeper task ended abnormally");
            }
        }
    }
}
