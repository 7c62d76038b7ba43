use crate::domain::model::AggregateRow;
use crate::domain::ports::SalaryStore;
use crate::utils::error::Result;
use std::sync::Arc;

/// Read-only average-salary-by-gender query over the whole store.
#[derive(Clone)]
pub struct Aggregator {
    store: Arc<dyn SalaryStore>,
}

impl Aggregator {
    pub fn new(store: Arc<dyn SalaryStore>) -> Self {
        Self { store }
    }

    /// One row per distinct gender, ordered by gender. Empty store gives an empty vector.
    pub fn compute(&self) -> Result<Vec<AggregateRow>> {
        let rows = self.store.query_group_average()?;
        tracing::debug!("Aggregated {} gender groups", rows.len());
        Ok(rows)
    }

    pub fn store(&self) -> &Arc<dyn SalaryStore> {
        &self.store
    }
}
