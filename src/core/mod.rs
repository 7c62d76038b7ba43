pub mod aggregator;
pub mod chart;
pub mod dashboard;
pub mod etl;
pub mod loader;
pub mod refresh;

pub use crate::domain::model::{AggregateRow, BarChart, Frame, LoadOutcome, NewSalaryRecord};
pub use crate::domain::ports::{ConfigProvider, SalaryStore};
pub use crate::utils::error::Result;
