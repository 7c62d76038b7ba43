use crate::core::dashboard::Dashboard;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(5000);

/// Timer that drives the dashboard: every tick is a full recompute-then-render.
///
/// The first tick fires immediately. Ticks that fall behind a slow render are
/// skipped, never queued, so renders do not pile up.
pub struct RefreshLoop {
    dashboard: Arc<Dashboard>,
    interval: Duration,
}

impl RefreshLoop {
    pub fn new(dashboard: Arc<Dashboard>, interval: Duration) -> Self {
        Self {
            dashboard,
            interval,
        }
    }

    /// Runs until `shutdown` flips to `true` (or its sender is dropped).
    /// Returns the number of ticks that fired.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) -> u64 {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!("🔄 Refreshing chart every {:?}", self.interval);

        let mut tick: u64 = 0;
        loop {
            if *shutdown.borrow() {
                break;
            }

            tokio::select! {
                _ = ticker.tick() => {
                    // 失敗只影響本次 tick，畫面保留上一張圖
                    if let Err(e) = self.dashboard.render(tick).await {
                        tracing::debug!("Tick {} dropped: {}", tick, e.user_friendly_message());
                    }
                    tick += 1;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        tracing::info!("Refresh loop stopped after {} ticks", tick);
        tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregator::Aggregator;
    use crate::core::chart::DEFAULT_CHART_TITLE;
    use crate::core::dashboard::tests::MockStore;
    use crate::domain::model::AggregateRow;
    use std::sync::atomic::Ordering;

    fn mock_dashboard(store: Arc<MockStore>) -> Arc<Dashboard> {
        Arc::new(Dashboard::new(Aggregator::new(store), DEFAULT_CHART_TITLE))
    }

    #[tokio::test]
    async fn test_loop_renders_on_each_tick_until_shutdown() {
        let store = Arc::new(MockStore::with_rows(vec![AggregateRow {
            gender: "F".to_string(),
            mean_salary: 2800.0,
        }]));
        let dashboard = mock_dashboard(store.clone());
        let (tx, rx) = watch::channel(false);

        let handle = tokio::spawn(
            RefreshLoop::new(dashboard.clone(), Duration::from_millis(10)).run(rx),
        );

        tokio::time::sleep(Duration::from_millis(80)).await;
        tx.send(true).unwrap();
        let ticks = handle.await.unwrap();

        assert!(ticks >= 2, "expected several ticks, got {}", ticks);
        assert_eq!(store.queries.load(Ordering::SeqCst) as u64, ticks);
        assert_eq!(dashboard.latest().unwrap().tick, ticks - 1);
    }

    #[tokio::test]
    async fn test_loop_survives_failing_ticks() {
        let store = Arc::new(MockStore::with_rows(vec![]));
        store.set_failing(true);
        let dashboard = mock_dashboard(store.clone());
        let (tx, rx) = watch::channel(false);

        let handle = tokio::spawn(
            RefreshLoop::new(dashboard.clone(), Duration::from_millis(10)).run(rx),
        );

        tokio::time::sleep(Duration::from_millis(50)).await;
        store.set_failing(false);
        tokio::time::sleep(Duration::from_millis(50)).await;
        drop(tx);

        let ticks = handle.await.unwrap();
        assert!(ticks >= 2);
        assert!(dashboard.latest().is_some());
    }
}
