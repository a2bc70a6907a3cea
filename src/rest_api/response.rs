//! # Response Formatting
//!
//! Standard response types for the catalog endpoints.

use serde::Serialize;
use serde_json::{json, Value};

use crate::query::FilterCondition;

/// Single record response
#[derive(Debug, Clone, Serialize)]
pub struct SingleResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> SingleResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Filter result with the conditions echoed back
#[derive(Debug, Clone, Serialize)]
pub struct FilterResponse<T: Serialize> {
    pub data: Vec<T>,
    pub total: usize,
    pub filters: Vec<FilterCondition>,
}

impl<T: Serialize> FilterResponse<T> {
    pub fn new(data: Vec<T>, filters: Vec<FilterCondition>) -> Self {
        let total = data.len();
        Self {
            data,
            total,
            filters,
        }
    }
}

/// Delete confirmation
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub id: i64,
}

impl DeleteResponse {
    pub fn success(id: i64) -> Self {
        Self {
            message: "Car deleted successfully".to_string(),
            id,
        }
    }
}

/// Canonical filter payload returned alongside malformed-body errors
pub fn filter_example() -> Value {
    json!({
        "filters": [
            { "field": "Brand", "operator": "equals", "value": "Tesla" },
            { "field": "PriceEuro", "operator": "greaterThan", "value": 50000 }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_response_counts_rows() {
        let response = FilterResponse::new(
            vec![json!({"id": 1}), json!({"id": 2})],
            vec![FilterCondition::new("Seats", "equals", json!(5))],
        );

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["total"], 2);
        assert_eq!(json["filters"][0]["operator"], "equals");
    }

    #[test]
    fn test_delete_response_serialization() {
        let json = serde_json::to_value(DeleteResponse::success(42)).unwrap();
        assert_eq!(json["message"], "Car deleted successfully");
        assert_eq!(json["id"], 42);
    }
}
