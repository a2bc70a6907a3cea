//! # Request Parser
//!
//! Turns raw query strings, path segments and bodies into typed requests.
//! Shape problems are reported here; range checks that belong to the data
//! layer (page bounds, id positivity) are enforced again by the store.

use std::collections::HashMap;

use serde_json::Value;

use crate::query::FilterCondition;
use crate::store::MAX_PAGE_SIZE;

use super::errors::{RestError, RestResult};

/// Page size used when the client does not send one
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Page used when the client does not send one
pub const DEFAULT_PAGE: u32 = 1;

/// Parsed pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: u32,
    pub page_size: u32,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageParams {
    /// Parse `page` and `pageSize`
    ///
    /// Only the leading integer of each value counts (`"20abc"` is 20,
    /// `"1001.5"` is 1001). Missing, non-numeric or zero values fall back to
    /// the defaults and negative values are raised to 1. A page size above
    /// the cap is an error.
    pub fn parse(params: &HashMap<String, String>) -> RestResult<Self> {
        let page = parse_positive(params.get("page"), DEFAULT_PAGE);
        let page_size = parse_positive(params.get("pageSize"), DEFAULT_PAGE_SIZE);

        if page_size > MAX_PAGE_SIZE {
            return Err(RestError::Validation(format!(
                "Page size cannot exceed {}",
                MAX_PAGE_SIZE
            )));
        }

        Ok(Self { page, page_size })
    }
}

fn parse_positive(value: Option<&String>, default: u32) -> u32 {
    match value.and_then(|v| leading_integer(v)) {
        None | Some(0) => default,
        Some(n) if n < 1 => 1,
        Some(n) => u32::try_from(n).unwrap_or(u32::MAX),
    }
}

/// Optional sign followed by at least one digit; trailing text is ignored.
/// Magnitudes beyond `i64` saturate.
fn leading_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (negative, rest) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }

    let magnitude = rest[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Extract the trimmed, non-empty `query` parameter
pub fn parse_search_query(params: &HashMap<String, String>) -> RestResult<String> {
    match params.get("query").map(|q| q.trim()) {
        Some(q) if !q.is_empty() => Ok(q.to_string()),
        _ => Err(RestError::Validation("Search query is required".to_string())),
    }
}

/// Parse a `:id` path segment into a positive row id
pub fn parse_car_id(raw: &str) -> RestResult<i64> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(RestError::Validation("Invalid car ID".to_string())),
    }
}

/// Extract the condition list from a `{"filters": [...]}` body
///
/// Operators and fields are not checked here; the filter compiler owns
/// that and reports it as an invalid filter.
pub fn parse_filter_body(body: Value) -> RestResult<Vec<FilterCondition>> {
    let filters = match body {
        Value::Object(mut obj) => obj.remove("filters"),
        _ => None,
    };

    match filters {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| {
                serde_json::from_value::<FilterCondition>(item)
                    .map_err(|e| RestError::InvalidBody(format!("Invalid filter condition: {}", e)))
            })
            .collect(),
        _ => Err(RestError::InvalidBody(
            "Invalid filters format. Expected array of filter conditions.".to_string(),
        )),
    }
}
