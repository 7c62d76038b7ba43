use crate::domain::model::{AggregateRow, NewSalaryRecord, SalaryRecord};
use crate::domain::ports::SalaryStore;
use crate::utils::error::{DashboardError, Result};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS salaires (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    genre TEXT,
    salaire REAL
)";

const GROUP_AVERAGE_SQL: &str = "SELECT genre, AVG(salaire) AS salaire_moyen
    FROM salaires
    GROUP BY genre
    ORDER BY genre";

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-backed [`SalaryStore`].
///
/// Every operation opens its own connection, so the store holds no handle
/// between calls and can be shared freely between the importer and the
/// refresh loop.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unavailable(&self, source: rusqlite::Error) -> DashboardError {
        DashboardError::storage(self.path.display().to_string(), source)
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path).map_err(|e| self.unavailable(e))?;
        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(|e| self.unavailable(e))?;
        Ok(conn)
    }
}

impl SalaryStore for SqliteStore {
    fn ensure_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.execute(CREATE_TABLE_SQL, [])
            .map_err(|e| self.unavailable(e))?;
        tracing::debug!("Schema ready in {}", self.path.display());
        Ok(())
    }

    fn append(&self, records: &[NewSalaryRecord]) -> Result<usize> {
        let mut conn = self.connect()?;
        let tx = conn.transaction().map_err(|e| self.unavailable(e))?;

        {
            let mut stmt = tx
                .prepare("INSERT INTO salaires (genre, salaire) VALUES (?1, ?2)")
                .map_err(|e| self.unavailable(e))?;
            for record in records {
                stmt.execute(params![record.gender, record.salary])
                    .map_err(|e| self.unavailable(e))?;
            }
        }

        // 任一筆失敗時 tx 被 drop，整批回滾
        tx.commit().map_err(|e| self.unavailable(e))?;
        Ok(records.len())
    }

    fn query_group_average(&self) -> Result<Vec<AggregateRow>> {
        let conn = self.connect()?;
        let mut stmt = conn
            .prepare(GROUP_AVERAGE_SQL)
            .map_err(|e| self.unavailable(e))?;

        let rows: std::result::Result<Vec<(Option<String>, Option<f64>)>, _> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .and_then(|mapped| mapped.collect());

        let rows = rows.map_err(|e| self.unavailable(e))?;

        // AVG 只有在整組 salaire 都是 NULL 時才會回傳 NULL，這種組別不畫
        Ok(rows
            .into_iter()
            .filter_map(|(gender, mean)| {
                mean.map(|mean_salary| AggregateRow {
                    gender: gender.unwrap_or_default(),
                    mean_salary,
                })
            })
            .collect())
    }

    fn count(&self) -> Result<usize> {
        let conn = self.connect()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM salaires", [], |row| row.get(0))
            .map_err(|e| self.unavailable(e))?;
        Ok(count as usize)
    }

    fn records(&self) -> Result<Vec<SalaryRecord>> {
        let conn = self.connect()?;
        let mut stmt = conn
            .prepare("SELECT id, genre, salaire FROM salaires ORDER BY id")
            .map_err(|e| self.unavailable(e))?;

        let records: std::result::Result<Vec<SalaryRecord>, _> = stmt
            .query_map([], |row| {
                Ok(SalaryRecord {
                    id: row.get(0)?,
                    gender: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    salary: row.get::<_, Option<f64>>(2)?.unwrap_or(f64::NAN),
                })
            })
            .and_then(|mapped| mapped.collect());

        records.map_err(|e| self.unavailable(e))
    }

    fn truncate(&self) -> Result<usize> {
        let conn = self.connect()?;
        let deleted = conn
            .execute("DELETE FROM salaires", [])
            .map_err(|e| self.unavailable(e))?;
        Ok(deleted)
    }
}
