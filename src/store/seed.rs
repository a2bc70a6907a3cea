//! # Catalog Seeding
//!
//! One-time table creation and CSV import. Rows are upserted on the
//! `(Brand, Model)` natural key, so re-running an import only refreshes
//! existing rows.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use csv::{ReaderBuilder, Trim};
use rusqlite::{params, params_from_iter};
use serde::{Deserialize, Serialize};

use crate::catalog::{create_table_sql, Car, CarField, TABLE_NAME};
use crate::observability::Logger;

use super::errors::{StoreError, StoreResult};
use super::rows::car_params;
use super::CarStore;

/// Cars parsed from a dataset, plus the rows that could not be used
#[derive(Debug, Clone, Default)]
pub struct CsvBatch {
    pub cars: Vec<Car>,
    pub skipped: usize,
}

/// Rows written by an upsert pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UpsertCounts {
    pub inserted: usize,
    pub updated: usize,
}

/// Outcome of a CSV import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub read: usize,
    pub inserted: usize,
    pub updated: usize,
    pub skipped: usize,
    pub total: i64,
}

/// Raw dataset row; every column is optional text until converted
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(rename = "Brand", default)]
    brand: String,
    #[serde(rename = "Model", default)]
    model: String,
    #[serde(rename = "AccelSec", default)]
    accel_sec: String,
    #[serde(rename = "TopSpeed_KmH", default)]
    top_speed_kmh: String,
    #[serde(rename = "Range_Km", default)]
    range_km: String,
    #[serde(rename = "Efficiency_WhKm", default)]
    efficiency_whkm: String,
    #[serde(rename = "FastCharge_KmH", default)]
    fast_charge_kmh: String,
    #[serde(rename = "RapidCharge", default)]
    rapid_charge: String,
    #[serde(rename = "PowerTrain", default)]
    power_train: String,
    #[serde(rename = "PlugType", default)]
    plug_type: String,
    #[serde(rename = "BodyStyle", default)]
    body_style: String,
    #[serde(rename = "Segment", default)]
    segment: String,
    #[serde(rename = "Seats", default)]
    seats: String,
    #[serde(rename = "PriceEuro", default)]
    price_euro: String,
    #[serde(rename = "Date", default)]
    date: String,
}

impl CsvRecord {
    /// `None` when the natural key is incomplete
    fn into_car(self) -> Option<Car> {
        let brand = text(self.brand)?;
        let model = text(self.model)?;

        let mut car = Car::new(brand, model);
        car.accel_sec = number(&self.accel_sec);
        car.top_speed_kmh = number(&self.top_speed_kmh);
        car.range_km = number(&self.range_km);
        car.efficiency_whkm = number(&self.efficiency_whkm);
        car.fast_charge_kmh = number(&self.fast_charge_kmh);
        car.rapid_charge = text(self.rapid_charge);
        car.power_train = text(self.power_train);
        car.plug_type = text(self.plug_type);
        car.body_style = text(self.body_style);
        car.segment = text(self.segment);
        car.seats = number(&self.seats);
        car.price_euro = number(&self.price_euro);
        car.date = text(self.date);
        Some(car)
    }
}

fn text(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Blank or unparsable cells (the dataset uses `-` for "no data") become null
fn number<T: FromStr>(value: &str) -> Option<T> {
    value.trim().parse().ok()
}

/// Parse a dataset with a header row
pub fn parse_csv<R: io::Read>(reader: R) -> StoreResult<CsvBatch> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut batch = CsvBatch::default();

    for (index, record) in reader.deserialize::<CsvRecord>().enumerate() {
        match record?.into_car() {
            Some(car) => batch.cars.push(car),
            None => {
                // header is line 1
                let line = (index + 2).to_string();
                Logger::warn(
                    "SEED_ROW_SKIPPED",
                    &[("line", line.as_str()), ("reason", "missing Brand or Model")],
                );
                batch.skipped += 1;
            }
        }
    }

    Ok(batch)
}

/// Parse the dataset file at `path`
pub fn read_csv(path: &Path) -> StoreResult<CsvBatch> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => StoreError::DatasetNotFound(path.to_path_buf()),
        _ => StoreError::Io(e),
    })?;
    parse_csv(file)
}

fn upsert_sql() -> String {
    let columns: Vec<&str> = CarField::ALL.iter().map(|field| field.column()).collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
    let updates: Vec<String> = CarField::ALL
        .iter()
        .filter(|field| !field.is_required())
        .map(|field| format!("{0} = excluded.{0}", field.column()))
        .collect();

    format!(
        "INSERT INTO {} ({}) VALUES ({}) \
         ON CONFLICT (Brand, Model) DO UPDATE SET {}, updated_at = CURRENT_TIMESTAMP",
        TABLE_NAME,
        columns.join(", "),
        placeholders.join(", "),
        updates.join(", ")
    )
}

impl CarStore {
    /// Create the catalog table if it does not exist
    pub async fn init_schema(&self) -> StoreResult<()> {
        self.interact(|conn| conn.execute_batch(&create_table_sql()))
            .await
    }

    /// Insert or refresh each car in one transaction
    pub async fn upsert(&self, cars: Vec<Car>) -> StoreResult<UpsertCounts> {
        self.interact(move |conn| {
            let tx = conn.transaction()?;
            let mut counts = UpsertCounts::default();
            {
                let mut exists = tx.prepare(&format!(
                    "SELECT EXISTS(SELECT 1 FROM {} WHERE Brand = ?1 AND Model = ?2)",
                    TABLE_NAME
                ))?;
                let mut upsert = tx.prepare(&upsert_sql())?;

                for car in &cars {
                    let existed: bool =
                        exists.query_row(params![car.brand, car.model], |row| row.get(0))?;
                    upsert.execute(params_from_iter(car_params(car)))?;
                    if existed {
                        counts.updated += 1;
                    } else {
                        counts.inserted += 1;
                    }
                }
            }
            tx.commit()?;
            Ok(counts)
        })
        .await
    }

    /// Create the table if needed and upsert every usable row of the dataset
    pub async fn seed_from_csv(&self, path: impl Into<PathBuf>) -> StoreResult<SeedSummary> {
        let path = path.into();
        if !path.exists() {
            return Err(StoreError::DatasetNotFound(path));
        }

        self.init_schema().await?;

        let batch = tokio::task::spawn_blocking(move || read_csv(&path))
            .await
            .map_err(|e| StoreError::Interact(e.to_string()))??;

        let read = batch.cars.len() + batch.skipped;
        let counts = self.upsert(batch.cars).await?;
        let total = self.count().await?;

        Ok(SeedSummary {
            read,
            inserted: counts.inserted,
            updated: counts.updated,
            skipped: batch.skipped,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Brand,Model,AccelSec,TopSpeed_KmH,Range_Km,Efficiency_WhKm,FastCharge_KmH,RapidCharge,PowerTrain,PlugType,BodyStyle,Segment,Seats,PriceEuro,Date
Tesla ,Model 3 Long Range Dual Motor,4.6,233,450,161,940,Yes,AWD,Type 2 CCS,Sedan,D,5,55480,8/24/16
Smart,EQ forfour,12.7,130,95,176,-,No,RWD,Type 2,Hatchback,A,4,22030,3/12/18
,Nameless,5.0,200,300,150,500,Yes,AWD,Type 2 CCS,SUV,D,5,40000,1/1/20
";

    #[test]
    fn test_parse_csv_converts_and_trims() {
        let batch = parse_csv(SAMPLE.as_bytes()).unwrap();
        assert_eq!(batch.cars.len(), 2);
        assert_eq!(batch.skipped, 1);

        let tesla = &batch.cars[0];
        assert_eq!(tesla.brand, "Tesla");
        assert_eq!(tesla.accel_sec, Some(4.6));
        assert_eq!(tesla.price_euro, Some(55480));
        assert_eq!(tesla.rapid_charge.as_deref(), Some("Yes"));
        assert_eq!(tesla.date.as_deref(), Some("8/24/16"));
    }

    #[test]
    fn test_dash_becomes_null() {
        let batch = parse_csv(SAMPLE.as_bytes()).unwrap();
        let smart = &batch.cars[1];
        assert_eq!(smart.fast_charge_kmh, None);
        assert_eq!(smart.seats, Some(4));
    }

    #[test]
    fn test_upsert_sql_shape() {
        let sql = upsert_sql();
        assert!(sql.starts_with("INSERT INTO cars (Brand, Model, AccelSec"));
        assert!(sql.contains("?15)"));
        assert!(sql.contains("ON CONFLICT (Brand, Model) DO UPDATE SET AccelSec = excluded.AccelSec"));
        assert!(!sql.contains("Brand = excluded.Brand"));
        assert!(sql.ends_with("updated_at = CURRENT_TIMESTAMP"));
    }

    #[test]
    fn test_missing_dataset() {
        let err = read_csv(Path::new("/nonexistent/cars.csv")).unwrap_err();
        assert!(matches!(err, StoreError::DatasetNotFound(_)));
    }
}
