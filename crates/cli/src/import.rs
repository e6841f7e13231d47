use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use insightboard_core::normalize_record;
use insightboard_store::InsightStore;
use serde_json::Value;

pub const BATCH_SIZE: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub total: usize,
    pub inserted: usize,
}

pub fn run(db: &Path, file: &Path, append: bool) -> Result<()> {
    let report = import_file(db, file, append)?;
    println!(
        "[insightboard] imported {}/{} records into {}",
        report.inserted,
        report.total,
        db.display()
    );
    Ok(())
}

pub fn import_file(db: &Path, file: &Path, append: bool) -> Result<ImportReport> {
    let raw = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let records: Vec<Value> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of records", file.display()))?;
    let documents: Vec<_> = records.iter().map(normalize_record).collect();

    let store = InsightStore::open(db)?;
    if !append {
        let removed = store.delete_all()?;
        if removed > 0 {
            println!("[insightboard] cleared {removed} existing records");
        }
    }

    let mut inserted = 0usize;
    for batch in documents.chunks(BATCH_SIZE) {
        inserted += store.insert_batch(batch)?;
        println!(
            "[insightboard] inserted {inserted}/{} records",
            documents.len()
        );
    }
    Ok(ImportReport {
        total: documents.len(),
        inserted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use insightboard_core::InsightFilter;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_fixture(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("data.json");
        fs::write(&path, contents).expect("write fixture");
        path
    }

    #[test]
    fn import_normalizes_raw_records() {
        let dir = TempDir::new().expect("temp dir");
        let data = write_fixture(
            &dir,
            r#"[
                {"topic": "gas", "intensity": "6", "end_year": 2025, "country": "Mexico"},
                {"topic": "", "intensity": "", "end_year": "junk"}
            ]"#,
        );
        let db = dir.path().join("insights.sqlite");
        let report = import_file(&db, &data, false).expect("import");
        assert_eq!(
            report,
            ImportReport {
                total: 2,
                inserted: 2
            }
        );

        let store = InsightStore::open(&db).expect("open");
        let items = store
            .find(&InsightFilter::match_all(), 0, 10)
            .expect("find");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].topic.as_deref(), Some("gas"));
        assert_eq!(items[0].intensity, Some(6.0));
        assert_eq!(items[0].end_year, Some(2025.0));
        assert_eq!(items[1].topic, None);
        assert_eq!(items[1].end_year, None);
    }

    #[test]
    fn import_replaces_unless_appending() {
        let dir = TempDir::new().expect("temp dir");
        let data = write_fixture(&dir, r#"[{"topic": "gas"}, {"topic": "oil"}]"#);
        let db = dir.path().join("insights.sqlite");
        let store = InsightStore::open(&db).expect("open");

        import_file(&db, &data, false).expect("first import");
        import_file(&db, &data, false).expect("second import");
        assert_eq!(store.count(&InsightFilter::match_all()).expect("count"), 2);

        import_file(&db, &data, true).expect("append import");
        assert_eq!(store.count(&InsightFilter::match_all()).expect("count"), 4);
    }

    #[test]
    fn import_rejects_non_array_payloads() {
        let dir = TempDir::new().expect("temp dir");
        let data = write_fixture(&dir, r#"{"topic": "gas"}"#);
        let db = dir.path().join("insights.sqlite");
        let err = import_file(&db, &data, false).expect_err("should fail");
        assert!(err.to_string().contains("JSON array"));
    }

    #[test]
    fn import_splits_large_files_into_batches() {
        let dir = TempDir::new().expect("temp dir");
        let payload = format!(
            "[{}]",
            vec![r#"{"topic":"gas"}"#; 2 * BATCH_SIZE + 500].join(",")
        );
        let data = write_fixture(&dir, &payload);
        let db = dir.path().join("insights.sqlite");
        let report = import_file(&db, &data, false).expect("import");
        assert_eq!(report.total, 2 * BATCH_SIZE + 500);
        assert_eq!(report.inserted, report.total);

        let store = InsightStore::open(&db).expect("open");
        assert_eq!(
            store.count(&InsightFilter::match_all()).expect("count") as usize,
            report.total
        );
    }

    #[test]
    fn empty_array_imports_nothing() {
        let dir = TempDir::new().expect("temp dir");
        let data = write_fixture(&dir, "[]");
        let db = dir.path().join("insights.sqlite");
        let report = import_file(&db, &data, false).expect("import");
        assert_eq!(
            report,
            ImportReport {
                total: 0,
                inserted: 0
            }
        );
    }
}
