//! Periodic snapshot flush and expiry sweep

use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::MissedTickBehavior;

use crate::core::types::{Cache, CacheInner};

/// Spawn the configured maintenance tasks on the current runtime
///
/// Tasks hold a weak reference so they never keep a dropped cache alive.
/// Without a runtime nothing is spawned and expiry stays lazy.
pub(super) fn start<V>(cache: &Cache<V>)
where
    V: Send + Sync + 'static,
{
    let inner = &cache.inner;
    let flush_interval = inner
        .persistence
        .as_ref()
        .and(inner.config.flush_interval);
    let sweep_interval = inner.config.sweep_interval;
    if flush_interval.is_none() && sweep_interval.is_none() {
        return;
    }

    let Ok(runtime) = Handle::try_current() else {
        tracing::debug!("no tokio runtime, cache background tasks disabled");
        return;
    };

    let mut handles = inner.background.lock();
    if let Some(period) = flush_interval {
        handles.push(runtime.spawn(flush_loop(Arc::downgrade(inner), period)));
    }
    if let Some(period) = sweep_interval {
        handles.push(runtime.spawn(sweep_loop(Arc::downgrade(inner), period)));
    }
}

fn ticker(period: Duration) -> tokio::time::Interval {
    let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

async fn flush_loop<V>(inner: Weak<CacheInner<V>>, period: Duration)
where
    V: Send + Sync + 'static,
{
    let mut interval = ticker(period);
    loop {
        interval.tick().await;
        let Some(inner) = inner.upgrade() else {
            break;
        };
        match tokio::task::spawn_blocking(move || inner.flush()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!(error = %e, "background cache flush failed"),
            Err(e) => tracing::warn!(error = %e, "background cache flush task failed"),
        }
    }
}

async fn sweep_loop<V>(inner: Weak<CacheInner<V>>, period: Duration)
where
    V: Send + Sync + 'static,
{
    let mut interval = ticker(period);
    loop {
        interval.tick().await;
        let Some(inner) = inner.upgrade() else {
            break;
        };
        inner.purge_expired();
    }
}
