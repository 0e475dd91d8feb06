// Tracks whether the database is reachable.
//
// The first connection-class failure flips the flag to unavailable and
// starts a background probe that pings the store on a fixed interval.
// Once a ping succeeds the flag flips back and the probe stops itself.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::shared::infrastructure::store::StorePing;

pub struct DbHealthMonitor {
    inner: Arc<Inner>,
}

struct Inner {
    available: AtomicBool,
    probing: AtomicBool,
    probe_interval: Duration,
    probe: Arc<dyn StorePing>,
}

impl DbHealthMonitor {
    pub fn new(probe: Arc<dyn StorePing>, probe_interval: Duration) -> Arc<Self> {
        Arc::new(Self {
            inner: Arc::new(Inner {
                available: AtomicBool::new(true),
                probing: AtomicBool::new(false),
                probe_interval,
                probe,
            }),
        })
    }

    pub fn is_available(&self) -> bool {
        self.inner.available.load(Ordering::SeqCst)
    }

    /// Flip to unavailable and start probing. Only the first caller after
    /// an available period actually starts a probe task.
    pub fn mark_unavailable(&self) {
        if self
            .inner
            .available
            .compare_exchange(true, false, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            tracing::warn!(
                interval = ?self.inner.probe_interval,
                "marking database as UNAVAILABLE, starting health probe"
            );
            self.spawn_probe();
        }
    }

    fn spawn_probe(&self) {
        if self.inner.probing.swap(true, Ordering::SeqCst) {
            return;
        }
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(inner.probe_interval);
            loop {
                interval.tick().await;
                match inner.probe.ping().await {
                    Ok(()) => {
                        // Order matters: a concurrent mark_unavailable must
                        // see probing == false once available is true again.
                        inner.probing.store(false, Ordering::SeqCst);
                        inner.available.store(true, Ordering::SeqCst);
                        tracing::info!("database is AVAILABLE again, stopping health probe");
                        break;
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "database health probe failed");
                    }
                }
            }
        });
    }
}
