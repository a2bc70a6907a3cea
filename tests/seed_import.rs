//! Seed Import Tests
//!
//! - the bundled dataset imports completely
//! - re-running an import updates in place instead of duplicating rows
//! - incomplete rows are skipped and counted
//! - a missing dataset fails before anything is written

use std::fs;
use std::path::PathBuf;

use evcatalog::store::StoreError;
use evcatalog::CarStore;
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

const HEADER: &str = "Brand,Model,AccelSec,TopSpeed_KmH,Range_Km,Efficiency_WhKm,FastCharge_KmH,RapidCharge,PowerTrain,PlugType,BodyStyle,Segment,Seats,PriceEuro,Date";

fn dataset_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/electric_cars.csv")
}

fn open_store(temp_dir: &TempDir) -> CarStore {
    CarStore::open(temp_dir.path().join("cars.db"), 2).unwrap()
}

fn write_csv(temp_dir: &TempDir, name: &str, rows: &[&str]) -> PathBuf {
    let path = temp_dir.path().join(name);
    let mut content = String::from(HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    fs::write(&path, content).unwrap();
    path
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_bundled_dataset_imports() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir);

    let summary = store.seed_from_csv(dataset_path()).await.unwrap();
    assert_eq!(summary.read, 30);
    assert_eq!(summary.inserted, 30);
    assert_eq!(summary.updated, 0);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.total, 30);
}

#[tokio::test]
async fn test_reseeding_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir);

    store.seed_from_csv(dataset_path()).await.unwrap();
    let ids_before: Vec<Option<i64>> = store
        .filter(&[])
        .await
        .unwrap()
        .into_iter()
        .map(|car| car.id)
        .collect();

    let summary = store.seed_from_csv(dataset_path()).await.unwrap();
    assert_eq!(summary.inserted, 0);
    assert_eq!(summary.updated, 30);
    assert_eq!(summary.total, 30);

    let ids_after: Vec<Option<i64>> = store
        .filter(&[])
        .await
        .unwrap()
        .into_iter()
        .map(|car| car.id)
        .collect();
    assert_eq!(ids_before, ids_after);
}

#[tokio::test]
async fn test_upsert_refreshes_existing_row() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir);

    let first = write_csv(
        &temp_dir,
        "first.csv",
        &["Kia ,EV6,5.2,185,450,180,600,Yes,AWD,Type 2 CCS,SUV,D,5,49990,5/1/21"],
    );
    let second = write_csv(
        &temp_dir,
        "second.csv",
        &[
            "Kia ,EV6,5.2,185,460,180,600,Yes,AWD,Type 2 CCS,SUV,D,5,47990,5/1/21",
            "Kia ,Niro EV,7.8,167,460,165,350,Yes,FWD,Type 2 CCS,SUV,C,5,44990,4/1/22",
        ],
    );

    store.seed_from_csv(first).await.unwrap();
    let summary = store.seed_from_csv(second).await.unwrap();
    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.updated, 1);
    assert_eq!(summary.total, 2);

    let ev6 = store.search("EV6").await.unwrap();
    assert_eq!(ev6.len(), 1);
    assert_eq!(ev6[0].price_euro, Some(47990));
    assert_eq!(ev6[0].range_km, Some(460));
}

#[tokio::test]
async fn test_incomplete_rows_are_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir);

    let path = write_csv(
        &temp_dir,
        "partial.csv",
        &[
            "Lightyear,One,10.0,150,575,104,540,Yes,FWD,Type 2 CCS,Liftback,F,5,149000,6/25/19",
            ",Unnamed,5.0,200,300,150,500,Yes,AWD,Type 2 CCS,SUV,D,5,40000,1/1/20",
            "Sono,,9.0,140,255,156,230,Yes,FWD,Type 2 CCS,Hatchback,C,5,25500,6/25/19",
        ],
    );

    let summary = store.seed_from_csv(path).await.unwrap();
    assert_eq!(summary.read, 3);
    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.total, 1);
}

#[tokio::test]
async fn test_missing_dataset_fails() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir);

    let err = store
        .seed_from_csv(temp_dir.path().join("missing.csv"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::DatasetNotFound(_)));
}

#[tokio::test]
async fn test_init_schema_is_repeatable() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir);

    store.init_schema().await.unwrap();
    store.init_schema().await.unwrap();
    assert_eq!(store.count().await.unwrap(), 0);
}
