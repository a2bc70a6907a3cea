//! Field definitions, DDL and column metadata for the `cars` table.

use serde::Serialize;

/// Name of the only table the service reads and writes
pub const TABLE_NAME: &str = "cars";

/// Filterable car attributes
///
/// This is the allow-list for filter conditions: a caller-supplied field
/// name only ever reaches SQL after it has been resolved to one of these
/// variants, and the identifier written into the query comes from
/// [`CarField::column`], never from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarField {
    Brand,
    Model,
    AccelSec,
    TopSpeedKmH,
    RangeKm,
    EfficiencyWhKm,
    FastChargeKmH,
    RapidCharge,
    PowerTrain,
    PlugType,
    BodyStyle,
    Segment,
    Seats,
    PriceEuro,
    Date,
}

/// Semantic type exposed to clients for form generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldKind {
    #[serde(rename = "string")]
    Text,
    #[serde(rename = "number")]
    Number,
}

impl CarField {
    /// All fields in table order
    pub const ALL: [CarField; 15] = [
        CarField::Brand,
        CarField::Model,
        CarField::AccelSec,
        CarField::TopSpeedKmH,
        CarField::RangeKm,
        CarField::EfficiencyWhKm,
        CarField::FastChargeKmH,
        CarField::RapidCharge,
        CarField::PowerTrain,
        CarField::PlugType,
        CarField::BodyStyle,
        CarField::Segment,
        CarField::Seats,
        CarField::PriceEuro,
        CarField::Date,
    ];

    /// Column identifier, also the JSON key and CSV header
    pub fn column(&self) -> &'static str {
        match self {
            CarField::Brand => "Brand",
            CarField::Model => "Model",
            CarField::AccelSec => "AccelSec",
            CarField::TopSpeedKmH => "TopSpeed_KmH",
            CarField::RangeKm => "Range_Km",
            CarField::EfficiencyWhKm => "Efficiency_WhKm",
            CarField::FastChargeKmH => "FastCharge_KmH",
            CarField::RapidCharge => "RapidCharge",
            CarField::PowerTrain => "PowerTrain",
            CarField::PlugType => "PlugType",
            CarField::BodyStyle => "BodyStyle",
            CarField::Segment => "Segment",
            CarField::Seats => "Seats",
            CarField::PriceEuro => "PriceEuro",
            CarField::Date => "Date",
        }
    }

    /// Resolve a caller-supplied name against the allow-list (exact match)
    pub fn from_column(name: &str) -> Option<CarField> {
        CarField::ALL.into_iter().find(|field| field.column() == name)
    }

    /// SQLite storage class for the column
    pub fn sql_type(&self) -> &'static str {
        match self {
            CarField::AccelSec => "REAL",
            CarField::TopSpeedKmH
            | CarField::RangeKm
            | CarField::EfficiencyWhKm
            | CarField::FastChargeKmH
            | CarField::Seats
            | CarField::PriceEuro => "INTEGER",
            _ => "TEXT",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self.sql_type() {
            "TEXT" => FieldKind::Text,
            _ => FieldKind::Number,
        }
    }

    /// Brand and model form the natural key and may not be null
    pub fn is_required(&self) -> bool {
        matches!(self, CarField::Brand | CarField::Model)
    }
}

/// Description of one filterable column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnMetadata {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub filterable: bool,
}

/// Body of the metadata endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ColumnsResponse {
    pub columns: Vec<ColumnMetadata>,
}

/// Column metadata generated from [`CarField::ALL`]
pub fn column_metadata() -> ColumnsResponse {
    ColumnsResponse {
        columns: CarField::ALL
            .iter()
            .map(|field| ColumnMetadata {
                name: field.column(),
                kind: field.kind(),
                filterable: true,
            })
            .collect(),
    }
}

/// `CREATE TABLE IF NOT EXISTS` statement for the catalog table
pub fn create_table_sql() -> String {
    let mut definitions = vec!["id INTEGER PRIMARY KEY AUTOINCREMENT".to_string()];

    for field in CarField::ALL {
        let mut definition = format!("{} {}", field.column(), field.sql_type());
        if field.is_required() {
            definition.push_str(" NOT NULL");
        }
        definitions.push(definition);
    }

    definitions.push("created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP".to_string());
    definitions.push("updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP".to_string());
    definitions.push("UNIQUE (Brand, Model)".to_string());

    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
        TABLE_NAME,
        definitions.join(",\n    ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_column_is_exact() {
        assert_eq!(CarField::from_column("PriceEuro"), Some(CarField::PriceEuro));
        assert_eq!(CarField::from_column("TopSpeed_KmH"), Some(CarField::TopSpeedKmH));
        assert_eq!(CarField::from_column("priceeuro"), None);
        assert_eq!(CarField::from_column("id"), None);
        assert_eq!(CarField::from_column("Brand; DROP TABLE cars"), None);
    }

    #[test]
    fn test_every_field_round_trips_through_column_name() {
        for field in CarField::ALL {
            assert_eq!(CarField::from_column(field.column()), Some(field));
        }
    }

    #[test]
    fn test_metadata_matches_field_list() {
        let metadata = column_metadata();
        assert_eq!(metadata.columns.len(), CarField::ALL.len());
        assert_eq!(metadata.columns[0].name, "Brand");
        assert_eq!(metadata.columns[2].kind, FieldKind::Number);
        assert!(metadata.columns.iter().all(|c| c.filterable));

        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["columns"][0]["type"], "string");
        assert_eq!(json["columns"][13]["name"], "PriceEuro");
        assert_eq!(json["columns"][13]["type"], "number");
    }

    #[test]
    fn test_create_table_sql() {
        let ddl = create_table_sql();
        assert!(ddl.starts_with("CREATE TABLE IF NOT EXISTS cars"));
        assert!(ddl.contains("Brand TEXT NOT NULL"));
        assert!(ddl.contains("AccelSec REAL,"));
        assert!(ddl.contains("PriceEuro INTEGER,"));
        assert!(ddl.contains("UNIQUE (Brand, Model)"));
    }
}
