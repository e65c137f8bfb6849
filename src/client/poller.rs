use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use super::SyncClient;

/// Running background poll loop. The loop ends when the handle is stopped or
/// dropped; [`PollHandle::stop`] also waits for it to finish.
pub struct PollHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Starts syncing every `sync_every` and probing health every
    /// `health_every`. The first sync runs immediately.
    pub fn spawn(client: SyncClient, sync_every: Duration, health_every: Duration) -> Self {
        let (shutdown, mut stop) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut sync_tick = interval(sync_every);
            sync_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut health_tick = interval(health_every);
            health_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The sync that runs on start already tells us whether we are online.
            health_tick.tick().await;

            loop {
                tokio::select! {
                    _ = stop.changed() => break,
                    _ = sync_tick.tick() => {
                        // A slow sync must not delay the next tick; the
                        // client drops overlapping attempts itself.
                        let client = client.clone();
                        tokio::spawn(async move {
                            client.sync().await;
                        });
                    }
                    _ = health_tick.tick() => {
                        let client = client.clone();
                        tokio::spawn(async move {
                            client.check_health().await;
                        });
                    }
                }
            }

            tracing::debug!("Poller stopped");
        });

        Self { shutdown, task }
    }

    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "Poller task ended abnormally");
        }
    }
}
