//! # Record Access Layer
//!
//! Every operation checks out one pooled SQLite connection, runs a single
//! parameterized statement (two for a page: count and slice) and hands the
//! connection back when the interaction ends, whether it succeeded or not.
//!
//! Input validation happens before a connection is requested.

mod errors;
mod rows;
pub mod seed;

use std::path::PathBuf;
use std::time::Duration;

use deadpool_sqlite::{Config, Pool, PoolConfig, Runtime};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Params};
use serde::Serialize;

use crate::catalog::{column_metadata, Car, ColumnsResponse, TABLE_NAME};
use crate::error::{CatalogError, CatalogResult};
use crate::query::filter::escape_like;
use crate::query::{compile, FilterCondition, FilterPlan};

pub use errors::{StoreError, StoreResult};
pub use seed::{CsvBatch, SeedSummary, UpsertCounts};

use rows::car_from_row;

/// Largest page the listing accepts
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Ordering applied to search and filter results
const RESULT_ORDER: &str = "Brand ASC, Model ASC";

/// How long a statement waits on a locked database before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// One page of the unordered listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarPage {
    pub data: Vec<Car>,
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
}

/// Pooled access to the `cars` table
pub struct CarStore {
    pool: Pool,
}

impl CarStore {
    /// Build a pool over the database file at `path`
    ///
    /// Connections are opened lazily, so a bad path surfaces on first use.
    pub fn open(path: impl Into<PathBuf>, pool_size: usize) -> StoreResult<Self> {
        let mut config = Config::new(path.into());
        config.pool = Some(PoolConfig::new(pool_size));

        let pool = config
            .create_pool(Runtime::Tokio1)
            .map_err(|e| StoreError::PoolCreate(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Run `f` on a pooled connection
    pub(crate) async fn interact<F, R>(&self, f: F) -> StoreResult<R>
    where
        F: FnOnce(&mut Connection) -> rusqlite::Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let conn = self
            .pool
            .get()
            .await
            .map_err(|e| StoreError::Checkout(e.to_string()))?;

        let result = conn
            .interact(move |conn| {
                conn.busy_timeout(BUSY_TIMEOUT)?;
                f(conn)
            })
            .await
            .map_err(|e| StoreError::Interact(e.to_string()))?;

        Ok(result?)
    }

    /// Page through the table in store-native order
    pub async fn list(&self, page: u32, page_size: u32) -> CatalogResult<CarPage> {
        if page < 1 {
            return Err(CatalogError::validation("Page must be at least 1"));
        }
        if page_size < 1 {
            return Err(CatalogError::validation("Page size must be at least 1"));
        }
        if page_size > MAX_PAGE_SIZE {
            return Err(CatalogError::validation(format!(
                "Page size cannot exceed {}",
                MAX_PAGE_SIZE
            )));
        }

        let limit = i64::from(page_size);
        let offset = i64::from(page - 1) * limit;

        let (data, total) = self
            .interact(move |conn| {
                let total: i64 = conn.query_row(
                    &format!("SELECT COUNT(*) FROM {}", TABLE_NAME),
                    [],
                    |row| row.get(0),
                )?;
                let data = query_cars(
                    conn,
                    &format!("SELECT * FROM {} LIMIT ?1 OFFSET ?2", TABLE_NAME),
                    params![limit, offset],
                )?;
                Ok((data, total))
            })
            .await?;

        Ok(CarPage {
            data,
            total,
            page,
            page_size,
        })
    }

    /// Rows whose brand, model or price text contains `query`
    pub async fn search(&self, query: &str) -> CatalogResult<Vec<Car>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CatalogError::validation("Search query is required"));
        }

        let pattern = format!("%{}%", escape_like(query));
        let cars = self
            .interact(move |conn| {
                let sql = format!(
                    "SELECT * FROM {} \
                     WHERE Brand LIKE ?1 ESCAPE '\\' \
                     OR Model LIKE ?1 ESCAPE '\\' \
                     OR CAST(PriceEuro AS TEXT) LIKE ?1 ESCAPE '\\' \
                     ORDER BY {}",
                    TABLE_NAME, RESULT_ORDER
                );
                query_cars(conn, &sql, [pattern])
            })
            .await?;

        Ok(cars)
    }

    /// Rows matching every condition
    ///
    /// An empty list returns the whole table unordered, like [`list`](Self::list);
    /// otherwise results are sorted by brand then model.
    pub async fn filter(&self, conditions: &[FilterCondition]) -> CatalogResult<Vec<Car>> {
        let plan = compile(conditions)?;

        let cars = self
            .interact(move |conn| match plan {
                FilterPlan::MatchAll => {
                    query_cars(conn, &format!("SELECT * FROM {}", TABLE_NAME), params![])
                }
                FilterPlan::Where(clause) => {
                    let sql = format!(
                        "SELECT * FROM {} WHERE {} ORDER BY {}",
                        TABLE_NAME, clause.sql, RESULT_ORDER
                    );
                    query_cars(conn, &sql, params_from_iter(clause.params.iter()))
                }
            })
            .await?;

        Ok(cars)
    }

    /// A single row, `None` when absent
    pub async fn get(&self, id: i64) -> CatalogResult<Option<Car>> {
        validate_id(id)?;

        let car = self
            .interact(move |conn| {
                conn.query_row(
                    &format!("SELECT * FROM {} WHERE id = ?1", TABLE_NAME),
                    [id],
                    car_from_row,
                )
                .optional()
            })
            .await?;

        Ok(car)
    }

    /// Permanently remove a row; `false` when there was nothing to remove
    pub async fn delete(&self, id: i64) -> CatalogResult<bool> {
        validate_id(id)?;

        let removed = self
            .interact(move |conn| {
                conn.execute(&format!("DELETE FROM {} WHERE id = ?1", TABLE_NAME), [id])
            })
            .await?;

        Ok(removed > 0)
    }

    /// Filterable column descriptions for client-side form generation
    pub fn column_metadata(&self) -> ColumnsResponse {
        column_metadata()
    }

    /// Total number of rows
    pub async fn count(&self) -> StoreResult<i64> {
        self.interact(|conn| {
            conn.query_row(
                &format!("SELECT COUNT(*) FROM {}", TABLE_NAME),
                [],
                |row| row.get(0),
            )
        })
        .await
    }

    /// Round-trip a trivial statement
    pub async fn ping(&self) -> StoreResult<()> {
        self.interact(|conn| conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0)))
            .await
            .map(|_| ())
    }
}

fn validate_id(id: i64) -> CatalogResult<()> {
    if id < 1 {
        return Err(CatalogError::validation("Invalid car ID"));
    }
    Ok(())
}

fn query_cars<P: Params>(conn: &Connection, sql: &str, params: P) -> rusqlite::Result<Vec<Car>> {
    let mut stmt = conn.prepare(sql)?;
    let cars = stmt
        .query_map(params, car_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(cars)
}
