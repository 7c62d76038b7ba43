use crate::core::aggregator::Aggregator;
use crate::core::chart::build_bar_chart;
use crate::domain::model::Frame;
use crate::utils::error::{DashboardError, Result};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardState {
    Idle,
    Rendering,
}

/// Turns the current store contents into a chart frame, one tick at a time.
///
/// Renders are serialized: a tick that arrives while another render is in
/// flight waits for it. A failed render leaves the previous frame in place.
pub struct Dashboard {
    aggregator: Aggregator,
    title: String,
    rendering: AtomicBool,
    render_gate: Mutex<()>,
    latest: RwLock<Option<Frame>>,
}

impl Dashboard {
    pub fn new(aggregator: Aggregator, title: impl Into<String>) -> Self {
        Self {
            aggregator,
            title: title.into(),
            rendering: AtomicBool::new(false),
            render_gate: Mutex::new(()),
            latest: RwLock::new(None),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn state(&self) -> DashboardState {
        if self.rendering.load(Ordering::Acquire) {
            DashboardState::Rendering
        } else {
            DashboardState::Idle
        }
    }

    /// 最近一次成功渲染的畫面
    pub fn latest(&self) -> Option<Frame> {
        self.latest
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Recomputes the aggregate and builds a fresh frame for `tick`.
    pub async fn render(&self, tick: u64) -> Result<Frame> {
        let _gate = self.render_gate.lock().await;
        self.render_locked(tick).await
    }

    /// Serves the latest frame, rendering tick 0 first when nothing has been drawn yet.
    pub async fn latest_or_initial(&self) -> Result<Frame> {
        if let Some(frame) = self.latest() {
            return Ok(frame);
        }

        let _gate = self.render_gate.lock().await;
        // 等待期間 refresh loop 可能已經畫好
        if let Some(frame) = self.latest() {
            return Ok(frame);
        }
        self.render_locked(0).await
    }

    async fn render_locked(&self, tick: u64) -> Result<Frame> {
        self.rendering.store(true, Ordering::Release);
        let result = self.render_frame(tick).await;
        self.rendering.store(false, Ordering::Release);

        match result {
            Ok(frame) => {
                let mut latest = self.latest.write().unwrap_or_else(|poisoned| {
                    tracing::warn!("Latest frame lock was poisoned, recovering");
                    poisoned.into_inner()
                });
                *latest = Some(frame.clone());
                drop(latest);

                tracing::debug!("Rendered tick {} with {} bars", tick, frame.chart.bars.len());
                Ok(frame)
            }
            Err(e) => {
                tracing::warn!("⚠️ Render of tick {} aborted, keeping previous chart: {}", tick, e);
                Err(e)
            }
        }
    }

    pub async fn record_count(&self) -> Result<usize> {
        let store = self.aggregator.store().clone();
        tokio::task::spawn_blocking(move || store.count())
            .await
            .map_err(|e| DashboardError::RenderError {
                message: format!("count task failed: {}", e),
            })?
    }

    async fn render_frame(&self, tick: u64) -> Result<Frame> {
        let aggregator = self.aggregator.clone();
        let rows = tokio::task::spawn_blocking(move || aggregator.compute())
            .await
            .map_err(|e| DashboardError::RenderError {
                message: format!("aggregation task failed: {}", e),
            })??;

        Ok(Frame {
            tick,
            rendered_at: chrono::Utc::now(),
            chart: build_bar_chart(&self.title, &rows),
        })
    }
}
