use crate::core::loader::{CsvLoader, CsvOptions};
use crate::domain::model::LoadOutcome;
use crate::domain::ports::{ConfigProvider, SalaryStore};
use crate::utils::error::Result;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub truncated: Option<usize>,
    pub outcome: LoadOutcome,
    pub total_records: usize,
}

/// Startup step run once before the dashboard serves: schema, optional reset, CSV import.
pub struct ImportEngine<C: ConfigProvider> {
    store: Arc<dyn SalaryStore>,
    loader: CsvLoader,
    config: C,
}

impl<C: ConfigProvider> ImportEngine<C> {
    pub fn new(store: Arc<dyn SalaryStore>, config: C, options: CsvOptions) -> Self {
        let loader = CsvLoader::new(store.clone(), options);
        Self {
            store,
            loader,
            config,
        }
    }

    pub fn run(&self) -> Result<ImportReport> {
        tracing::info!(
            "🗄️ Preparing store at {}",
            self.config.database_path().display()
        );
        self.store.ensure_schema()?;

        let truncated = if self.config.reset_on_start() {
            let deleted = self.store.truncate()?;
            tracing::warn!("🧹 Store reset requested, deleted {} existing records", deleted);
            Some(deleted)
        } else {
            None
        };

        // 每次啟動都會附加匯入，不做去重
        let outcome = self.loader.load(self.config.csv_path())?;
        let total_records = self.store.count()?;
        tracing::info!("📊 Store now holds {} salary records", total_records);

        Ok(ImportReport {
            truncated,
            outcome,
            total_records,
        })
    }
}
