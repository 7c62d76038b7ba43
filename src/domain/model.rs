use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 尚未寫入資料庫的薪資記錄，`id` 由 Store 指派
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSalaryRecord {
    pub gender: String,
    pub salary: f64,
}

impl NewSalaryRecord {
    pub fn new(gender: impl Into<String>, salary: f64) -> Self {
        Self {
            gender: gender.into(),
            salary,
        }
    }
}

/// A persisted row of the `salaires` table. Ids are never reused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRecord {
    pub id: i64,
    pub gender: String,
    pub salary: f64,
}

/// One group of the average-by-gender query. Derived on every call, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub gender: String,
    pub mean_salary: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: String,
}

/// Renderable description of the bar chart, consumed by the dashboard page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
}

/// 一次渲染的結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub tick: u64,
    pub rendered_at: DateTime<Utc>,
    pub chart: BarChart,
}

/// Result of a startup import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadOutcome {
    /// 來源檔案不存在，略過匯入
    Skipped,
    Imported { rows: usize },
}
