use crate::domain::model::{AggregateRow, NewSalaryRecord, SalaryRecord};
use crate::utils::error::Result;
use std::path::Path;

/// Persistent owner of all salary records.
///
/// Implementations are called from tokio's blocking pool, so methods are
/// synchronous and the store must be shareable across threads.
pub trait SalaryStore: Send + Sync {
    /// Creates the `salaires` table if it does not exist. Safe to call on every startup.
    fn ensure_schema(&self) -> Result<()>;

    /// Inserts all records in one transaction and returns how many were written.
    /// Existing rows are never overwritten or deduplicated.
    fn append(&self, records: &[NewSalaryRecord]) -> Result<usize>;

    /// Average salary per distinct gender over the whole table, ordered by gender.
    fn query_group_average(&self) -> Result<Vec<AggregateRow>>;

    fn count(&self) -> Result<usize>;

    fn records(&self) -> Result<Vec<SalaryRecord>>;

    /// Deletes every row. Ids keep increasing afterwards.
    fn truncate(&self) -> Result<usize>;
}

pub trait ConfigProvider: Send + Sync {
    fn database_path(&self) -> &Path;
    fn csv_path(&self) -> &Path;
    fn reset_on_start(&self) -> bool;
}
