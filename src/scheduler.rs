//! Background decay scheduler.
//!
//! One long-lived tokio task sweeps the pet store on a fixed interval,
//! applying idle decay to every pet and handing distress events to the
//! notification sink. The sweep itself ([`sweep_at`]) is a plain synchronous
//! function over the store, so the decay decision is testable without a
//! runtime or a live transport; the task only supplies the timer and the
//! shutdown plumbing.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::config::DecayConfig;
use crate::decay;
use crate::error::Result;
use crate::mood;
use crate::notify::{deliver_best_effort, NotificationSink, PetEvent};
use crate::store::PetStore;

/// Counters from one sweep cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Pets visited.
    pub visited: usize,
    /// Pets that were idle long enough for decay to apply.
    pub decayed: usize,
    /// Distress notifications emitted.
    pub distressed: usize,
    /// Pets whose mutation failed (logged and skipped).
    pub failed: usize,
}

/// Run one decay sweep over every active pet at wall-clock now.
///
/// # Errors
///
/// Returns [`PawbondError::StorageUnavailable`](crate::PawbondError::StorageUnavailable)
/// if the pairing list cannot be read. Per-pet failures are logged and
/// counted, not propagated — one broken record must not starve the rest.
pub fn sweep(store: &PetStore, config: &DecayConfig, sink: &dyn NotificationSink) -> Result<SweepStats> {
    sweep_at(store, config, sink, Utc::now())
}

/// Run one decay sweep with an explicit timestamp.
///
/// # Errors
///
/// See [`sweep`].
pub fn sweep_at(
    store: &PetStore,
    config: &DecayConfig,
    sink: &dyn NotificationSink,
    now: DateTime<Utc>,
) -> Result<SweepStats> {
    let mut stats = SweepStats::default();

    store.for_each_active(|pairing| {
        stats.visited += 1;
        match store.mutate(pairing, |pet| Ok(decay::apply_decay(pet, now, config))) {
            Ok((pet, outcome)) => {
                if outcome.decayed {
                    stats.decayed += 1;
                }
                if outcome.distress {
                    stats.distressed += 1;
                    let event = PetEvent::Distress {
                        average: pet.stat_average(),
                        mood: mood::classify(&pet),
                    };
                    for user in pairing.members() {
                        deliver_best_effort(sink, user, &event);
                    }
                }
            }
            Err(e) => {
                stats.failed += 1;
                warn!(pair = %pairing.key, error = %e, "decay sweep failed for pet");
            }
        }
    })?;

    Ok(stats)
}

/// Handle to the running decay scheduler task.
pub struct DecayScheduler {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl DecayScheduler {
    /// Spawn the scheduler on the current tokio runtime.
    ///
    /// The first sweep runs immediately, then every
    /// `config.sweep_interval_seconds`. Sweeps run on the blocking thread
    /// pool since the store is synchronous.
    #[must_use]
    pub fn spawn(
        store: Arc<PetStore>,
        config: DecayConfig,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        let (shutdown, mut rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker =
                tokio::time::interval(Duration::from_secs(config.sweep_interval_seconds.max(1)));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            info!(
                interval_s = config.sweep_interval_seconds,
                "decay scheduler started"
            );

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let store = Arc::clone(&store);
                        let config = config.clone();
                        let sink = Arc::clone(&sink);
                        let result = tokio::task::spawn_blocking(move || {
                            sweep(&store, &config, sink.as_ref())
                        })
                        .await;

                        match result {
                            Ok(Ok(stats)) => {
                                debug!(
                                    visited = stats.visited,
                                    decayed = stats.decayed,
                                    distressed = stats.distressed,
                                    failed = stats.failed,
                                    "decay sweep completed"
                                );
                            }
                            Ok(Err(e)) => warn!(error = %e, "decay sweep aborted"),
                            Err(e) => warn!(error = %e, "decay sweep task panicked"),
                        }
                    }
                    changed = rx.changed() => {
                        if changed.is_err() || *rx.borrow() {
                            break;
                        }
                    }
                }
            }
            info!("decay scheduler stopped");
        });

        Self { shutdown, handle }
    }

    /// Signal shutdown and wait for the task to finish.
    ///
    /// No new sweep cycles start after the signal; an in-flight sweep runs
    /// to completion so no write is lost mid-mutation.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        let _ = self.handle.await;
    }
}
