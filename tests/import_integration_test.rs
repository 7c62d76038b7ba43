use salary_dashboard::core::loader::CsvOptions;
use salary_dashboard::domain::model::LoadOutcome;
use salary_dashboard::domain::ports::SalaryStore;
use salary_dashboard::{Aggregator, CsvLoader, DashboardError, SqliteStore};
use std::sync::Arc;
use tempfile::TempDir;

const SAMPLE_CSV: &str = "\
id_employe;genre;salaire
1;Femme;2500
2;Homme;2700
3;Femme;3100
4;Homme;3300
";

fn fresh_store(dir: &TempDir) -> Arc<SqliteStore> {
    let store = Arc::new(SqliteStore::new(dir.path().join("database.db")));
    store.ensure_schema().unwrap();
    store
}

#[test]
fn test_import_then_aggregate() {
    let temp_dir = TempDir::new().unwrap();
    let store = fresh_store(&temp_dir);
    let csv_path = temp_dir.path().join("data.csv");
    std::fs::write(&csv_path, SAMPLE_CSV).unwrap();

    let loader = CsvLoader::new(store.clone(), CsvOptions::default());
    assert_eq!(
        loader.load(&csv_path).unwrap(),
        LoadOutcome::Imported { rows: 4 }
    );

    let rows = Aggregator::new(store).compute().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].gender, "Femme");
    assert_eq!(rows[0].mean_salary, 2800.0);
    assert_eq!(rows[1].gender, "Homme");
    assert_eq!(rows[1].mean_salary, 3000.0);
}

#[test]
fn test_loading_same_file_twice_doubles_rows() {
    let temp_dir = TempDir::new().unwrap();
    let store = fresh_store(&temp_dir);
    let csv_path = temp_dir.path().join("data.csv");
    std::fs::write(&csv_path, SAMPLE_CSV).unwrap();

    let loader = CsvLoader::new(store.clone(), CsvOptions::default());
    loader.load(&csv_path).unwrap();
    loader.load(&csv_path).unwrap();

    // 已知行為：重複匯入會重複資料
    assert_eq!(store.count().unwrap(), 8);

    // averages are unchanged by exact duplication
    let rows = Aggregator::new(store.clone()).compute().unwrap();
    assert_eq!(rows[0].mean_salary, 2800.0);

    let ids: Vec<i64> = store.records().unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, (1..=8).collect::<Vec<i64>>());
}

#[test]
fn test_malformed_file_is_all_or_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let store = fresh_store(&temp_dir);

    let good = temp_dir.path().join("good.csv");
    std::fs::write(&good, SAMPLE_CSV).unwrap();
    let bad = temp_dir.path().join("bad.csv");
    std::fs::write(&bad, "genre;salaire\nFemme;2500\nHomme;deux mille\nFemme;3100\n").unwrap();

    let loader = CsvLoader::new(store.clone(), CsvOptions::default());
    loader.load(&good).unwrap();

    let err = loader.load(&bad).unwrap_err();
    assert!(matches!(err, DashboardError::ParseError { line: 3, .. }));
    assert_eq!(store.count().unwrap(), 4);
}

#[test]
fn test_french_decimal_file() {
    let temp_dir = TempDir::new().unwrap();
    let store = fresh_store(&temp_dir);
    let csv_path = temp_dir.path().join("data.csv");
    std::fs::write(&csv_path, "genre;salaire\nFemme;2500,50\nFemme;2499,50\n").unwrap();

    let options = CsvOptions {
        delimiter: b';',
        decimal_separator: ',',
    };
    CsvLoader::new(store.clone(), options).load(&csv_path).unwrap();

    let rows = Aggregator::new(store).compute().unwrap();
    assert_eq!(rows[0].mean_salary, 2500.0);
}
