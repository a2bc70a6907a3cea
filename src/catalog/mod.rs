//! # Car Catalog Schema
//!
//! The single definition of the `cars` table. The DDL, the filter
//! allow-list and the column metadata served to clients are all derived
//! from [`CarField`], so adding a column means touching one enum.

mod record;
mod schema;

pub use record::Car;
pub use schema::{
    column_metadata, create_table_sql, CarField, ColumnMetadata, ColumnsResponse, FieldKind,
    TABLE_NAME,
};
