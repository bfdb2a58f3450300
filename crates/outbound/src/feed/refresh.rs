//! Periodic feed refresh.
//!
//! Each interval tick re-pulls the feed through the cache (so a tick inside
//! the TTL is a cheap hit). A manual trigger drops the cache first and always
//! goes back to the source. Outcomes are published on a broadcast channel so
//! views can rebuild their snapshots.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;

use super::cache::FeedCache;
use crate::sanitize;

#[derive(Debug, Clone)]
pub enum RefreshEvent {
    Refreshed {
        rows: usize,
        fetched_at: DateTime<Utc>,
        manual: bool,
    },
    Failed {
        error: String,
        manual: bool,
    },
}

pub struct RefreshScheduler {
    cache: Arc<FeedCache>,
    location: String,
    interval: Duration,
    shutdown: Arc<AtomicBool>,
    events: broadcast::Sender<RefreshEvent>,
}

impl RefreshScheduler {
    pub fn new(cache: Arc<FeedCache>, location: impl Into<String>, interval: Duration) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            cache,
            location: location.into(),
            interval,
            shutdown: Arc::new(AtomicBool::new(false)),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RefreshEvent> {
        self.events.subscribe()
    }

    /// Start the refresh loop in a background thread.
    /// Accepts a trigger receiver for manual refresh requests.
    pub fn start(
        &self,
        mut trigger_rx: broadcast::Receiver<()>,
    ) -> std::io::Result<JoinHandle<()>> {
        let cache = Arc::clone(&self.cache);
        let shutdown = Arc::clone(&self.shutdown);
        let events = self.events.clone();
        let location = self.location.clone();
        let interval = self.interval;

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(std::thread::spawn(move || {
            rt.block_on(async {
                let mut interval_timer = tokio::time::interval(interval);
                interval_timer.tick().await; // skip immediate first tick

                loop {
                    if shutdown.load(Ordering::Acquire) {
                        break;
                    }

                    let manual = tokio::select! {
                        _ = interval_timer.tick() => false,
                        Ok(()) = trigger_rx.recv() => {
                            log::info!("Manual feed refresh triggered");
                            true
                        },
                    };

                    if shutdown.load(Ordering::Acquire) {
                        break;
                    }

                    let cache = Arc::clone(&cache);
                    let fetch_location = location.clone();
                    let outcome = tokio::task::spawn_blocking(move || {
                        if manual {
                            cache.invalidate();
                        }
                        cache
                            .fetch(&fetch_location)
                            .map(|table| (table.len(), cache.fetched_at(&fetch_location)))
                    })
                    .await;

                    let event = match outcome {
                        Ok(Ok((rows, fetched_at))) => RefreshEvent::Refreshed {
                            rows,
                            fetched_at: fetched_at.unwrap_or_else(Utc::now),
                            manual,
                        },
                        Ok(Err(e)) => {
                            log::error!(
                                "Feed refresh from {} failed: {}",
                                sanitize::redact_url(&location),
                                e
                            );
                            RefreshEvent::Failed {
                                error: e.to_string(),
                                manual,
                            }
                        }
                        Err(e) => RefreshEvent::Failed {
                            error: format!("refresh task aborted: {}", e),
                            manual,
                        },
                    };

                    // No active receivers is fine
                    let _ = events.send(event);
                }
            });
        }))
    }

    /// Signals the scheduler to stop.
    pub fn stop(&self) {
        self.shutdown.store(true, Ordering::Release);
    }
}
