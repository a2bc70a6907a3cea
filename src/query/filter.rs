//! # Filter Compiler
//!
//! Translates an ordered list of filter conditions into a parameterized
//! WHERE fragment. Conditions are joined with AND in list order; there is
//! no OR, grouping or negation.

use std::fmt;
use std::str::FromStr;

use rusqlite::types::{ToSql, ToSqlOutput};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::CarField;
use crate::error::{CatalogError, CatalogResult};

/// Filter operators accepted on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Contains,
    Equals,
    StartsWith,
    EndsWith,
    IsEmpty,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

impl FilterOperator {
    /// Wire name of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Contains => "contains",
            FilterOperator::Equals => "equals",
            FilterOperator::StartsWith => "startsWith",
            FilterOperator::EndsWith => "endsWith",
            FilterOperator::IsEmpty => "isEmpty",
            FilterOperator::GreaterThan => "greaterThan",
            FilterOperator::LessThan => "lessThan",
            FilterOperator::GreaterThanOrEqual => "greaterThanOrEqual",
            FilterOperator::LessThanOrEqual => "lessThanOrEqual",
        }
    }

}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOperator {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contains" => Ok(FilterOperator::Contains),
            "equals" => Ok(FilterOperator::Equals),
            "startsWith" => Ok(FilterOperator::StartsWith),
            "endsWith" => Ok(FilterOperator::EndsWith),
            "isEmpty" => Ok(FilterOperator::IsEmpty),
            "greaterThan" => Ok(FilterOperator::GreaterThan),
            "lessThan" => Ok(FilterOperator::LessThan),
            "greaterThanOrEqual" => Ok(FilterOperator::GreaterThanOrEqual),
            "lessThanOrEqual" => Ok(FilterOperator::LessThanOrEqual),
            other => Err(CatalogError::invalid_filter(format!(
                "Unknown operator: {}",
                other
            ))),
        }
    }
}

/// One (field, operator, value) condition as received from a client
///
/// Field and operator stay strings until compilation so that an unknown
/// name surfaces as [`CatalogError::InvalidFilter`] rather than as a body
/// deserialization failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCondition {
    pub field: String,
    pub operator: String,
    #[serde(default)]
    pub value: Value,
}

impl FilterCondition {
    pub fn new(field: impl Into<String>, operator: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value,
        }
    }
}

/// A value bound to a `?` placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum BoundValue {
    Text(String),
    Integer(i64),
    Real(f64),
}

impl ToSql for BoundValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            BoundValue::Text(s) => ToSqlOutput::from(s.as_str()),
            BoundValue::Integer(i) => ToSqlOutput::from(*i),
            BoundValue::Real(f) => ToSqlOutput::from(*f),
        })
    }
}

/// Compiled boolean expression plus its parameters, in placeholder order
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    pub sql: String,
    pub params: Vec<BoundValue>,
}

/// Outcome of compiling a condition list
#[derive(Debug, Clone, PartialEq)]
pub enum FilterPlan {
    /// No conditions: every row matches
    MatchAll,
    /// Rows must satisfy the clause
    Where(WhereClause),
}

/// Compile conditions into a [`FilterPlan`]
///
/// Fails on the first unknown field, unknown operator or unusable value;
/// nothing is partially applied.
pub fn compile(conditions: &[FilterCondition]) -> CatalogResult<FilterPlan> {
    if conditions.is_empty() {
        return Ok(FilterPlan::MatchAll);
    }

    let mut fragments = Vec::with_capacity(conditions.len());
    let mut params = Vec::with_capacity(conditions.len());

    for condition in conditions {
        let field = CarField::from_column(&condition.field).ok_or_else(|| {
            CatalogError::invalid_filter(format!("Unknown field: {}", condition.field))
        })?;
        let operator: FilterOperator = condition.operator.parse()?;
        let column = field.column();

        match operator {
            FilterOperator::Contains => {
                let text = text_operand(condition, operator)?;
                fragments.push(format!("{} LIKE ? ESCAPE '\\'", column));
                params.push(BoundValue::Text(format!("%{}%", escape_like(&text))));
            }
            FilterOperator::StartsWith => {
                let text = text_operand(condition, operator)?;
                fragments.push(format!("{} LIKE ? ESCAPE '\\'", column));
                params.push(BoundValue::Text(format!("{}%", escape_like(&text))));
            }
            FilterOperator::EndsWith => {
                let text = text_operand(condition, operator)?;
                fragments.push(format!("{} LIKE ? ESCAPE '\\'", column));
                params.push(BoundValue::Text(format!("%{}", escape_like(&text))));
            }
            FilterOperator::Equals => {
                fragments.push(format!("{} = ?", column));
                params.push(equality_operand(condition)?);
            }
            FilterOperator::IsEmpty => {
                fragments.push(format!("({0} IS NULL OR {0} = '')", column));
            }
            FilterOperator::GreaterThan => {
                push_comparison(&mut fragments, &mut params, column, ">", condition, operator)?
            }
            FilterOperator::LessThan => {
                push_comparison(&mut fragments, &mut params, column, "<", condition, operator)?
            }
            FilterOperator::GreaterThanOrEqual => {
                push_comparison(&mut fragments, &mut params, column, ">=", condition, operator)?
            }
            FilterOperator::LessThanOrEqual => {
                push_comparison(&mut fragments, &mut params, column, "<=", condition, operator)?
            }
        }
    }

    Ok(FilterPlan::Where(WhereClause {
        sql: fragments.join(" AND "),
        params,
    }))
}

fn push_comparison(
    fragments: &mut Vec<String>,
    params: &mut Vec<BoundValue>,
    column: &str,
    symbol: &str,
    condition: &FilterCondition,
    operator: FilterOperator,
) -> CatalogResult<()> {
    params.push(numeric_operand(condition, operator)?);
    fragments.push(format!("{} {} ?", column, symbol));
    Ok(())
}

/// Escape LIKE metacharacters so the value matches literally under `ESCAPE '\'`
pub(crate) fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn text_operand(condition: &FilterCondition, operator: FilterOperator) -> CatalogResult<String> {
    match &condition.value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(unusable_value(condition, operator, other)),
    }
}

fn equality_operand(condition: &FilterCondition) -> CatalogResult<BoundValue> {
    match &condition.value {
        Value::String(s) => Ok(BoundValue::Text(s.clone())),
        Value::Number(n) => number_to_bound(n)
            .ok_or_else(|| unusable_value(condition, FilterOperator::Equals, &condition.value)),
        other => Err(unusable_value(condition, FilterOperator::Equals, other)),
    }
}

/// Ordering operators reject anything that is not a finite number or a
/// string that parses as one.
fn numeric_operand(
    condition: &FilterCondition,
    operator: FilterOperator,
) -> CatalogResult<BoundValue> {
    let bound = match &condition.value {
        Value::Number(n) => number_to_bound(n),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .map(BoundValue::Integer)
                .ok()
                .or_else(|| {
                    trimmed
                        .parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite())
                        .map(BoundValue::Real)
                })
        }
        _ => None,
    };

    bound.ok_or_else(|| {
        CatalogError::invalid_filter(format!(
            "Value for {} on {} must be numeric, got {}",
            operator, condition.field, condition.value
        ))
    })
}

fn number_to_bound(n: &serde_json::Number) -> Option<BoundValue> {
    if let Some(i) = n.as_i64() {
        Some(BoundValue::Integer(i))
    } else {
        n.as_f64().filter(|f| f.is_finite()).map(BoundValue::Real)
    }
}

fn unusable_value(
    condition: &FilterCondition,
    operator: FilterOperator,
    value: &Value,
) -> CatalogError {
    CatalogError::invalid_filter(format!(
        "Value for {} on {} must be a string or number, got {}",
        operator, condition.field, value
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn where_clause(conditions: &[FilterCondition]) -> WhereClause {
        match compile(conditions).unwrap() {
            FilterPlan::Where(clause) => clause,
            FilterPlan::MatchAll => panic!("expected a where clause"),
        }
    }

    #[test]
    fn test_empty_list_matches_all() {
        assert_eq!(compile(&[]).unwrap(), FilterPlan::MatchAll);
    }

    #[test]
    fn test_text_operators() {
        let clause = where_clause(&[
            FilterCondition::new("Brand", "contains", json!("esl")),
            FilterCondition::new("Model", "startsWith", json!("Model")),
            FilterCondition::new("PlugType", "endsWith", json!("CCS")),
        ]);

        assert_eq!(
            clause.sql,
            "Brand LIKE ? ESCAPE '\\' AND Model LIKE ? ESCAPE '\\' AND PlugType LIKE ? ESCAPE '\\'"
        );
        assert_eq!(
            clause.params,
            vec![
                BoundValue::Text("%esl%".to_string()),
                BoundValue::Text("Model%".to_string()),
                BoundValue::Text("%CCS".to_string()),
            ]
        );
    }

    #[test]
    fn test_equals_keeps_value_type() {
        let clause = where_clause(&[
            FilterCondition::new("Brand", "equals", json!("Tesla")),
            FilterCondition::new("Seats", "equals", json!(5)),
        ]);

        assert_eq!(clause.sql, "Brand = ? AND Seats = ?");
        assert_eq!(
            clause.params,
            vec![BoundValue::Text("Tesla".to_string()), BoundValue::Integer(5)]
        );
    }

    #[test]
    fn test_is_empty_binds_nothing() {
        let clause = where_clause(&[FilterCondition::new("Segment", "isEmpty", Value::Null)]);

        assert_eq!(clause.sql, "(Segment IS NULL OR Segment = '')");
        assert!(clause.params.is_empty());
    }

    #[test]
    fn test_ordering_operators_coerce_to_numbers() {
        let clause = where_clause(&[
            FilterCondition::new("PriceEuro", "greaterThan", json!(50000)),
            FilterCondition::new("AccelSec", "lessThan", json!("5.5")),
            FilterCondition::new("Range_Km", "greaterThanOrEqual", json!(" 400 ")),
            FilterCondition::new("Seats", "lessThanOrEqual", json!(4.0)),
        ]);

        assert_eq!(
            clause.sql,
            "PriceEuro > ? AND AccelSec < ? AND Range_Km >= ? AND Seats <= ?"
        );
        assert_eq!(
            clause.params,
            vec![
                BoundValue::Integer(50000),
                BoundValue::Real(5.5),
                BoundValue::Integer(400),
                BoundValue::Real(4.0),
            ]
        );
    }

    #[test]
    fn test_non_numeric_value_is_rejected() {
        let err = compile(&[FilterCondition::new("PriceEuro", "greaterThan", json!("cheap"))])
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidFilter(_)));
        assert!(err.to_string().contains("must be numeric"));

        let err = compile(&[FilterCondition::new("PriceEuro", "lessThan", Value::Null)]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidFilter(_)));
    }

    #[test]
    fn test_unknown_operator_names_the_operator() {
        let err = compile(&[
            FilterCondition::new("Brand", "equals", json!("Tesla")),
            FilterCondition::new("Brand", "regex", json!("T.*")),
        ])
        .unwrap_err();

        assert!(matches!(err, CatalogError::InvalidFilter(_)));
        assert_eq!(err.to_string(), "Invalid filter: Unknown operator: regex");
    }

    #[test]
    fn test_unknown_field_is_rejected_before_sql() {
        let err = compile(&[FilterCondition::new(
            "Brand = Brand OR 1",
            "equals",
            json!("x"),
        )])
        .unwrap_err();

        assert!(matches!(err, CatalogError::InvalidFilter(_)));
        assert!(err.to_string().contains("Unknown field"));
    }

    #[test]
    fn test_like_metacharacters_are_escaped() {
        let clause = where_clause(&[FilterCondition::new("Model", "contains", json!("100%_a\\b"))]);

        assert_eq!(
            clause.params,
            vec![BoundValue::Text("%100\\%\\_a\\\\b%".to_string())]
        );
    }

    #[test]
    fn test_text_operator_rejects_structured_values() {
        let err = compile(&[FilterCondition::new("Brand", "contains", json!(["a"]))]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidFilter(_)));

        let err = compile(&[FilterCondition::new("Brand", "equals", json!(true))]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidFilter(_)));
    }

    #[test]
    fn test_numbers_are_accepted_by_text_operators() {
        let clause = where_clause(&[FilterCondition::new("PriceEuro", "startsWith", json!(55))]);
        assert_eq!(clause.params, vec![BoundValue::Text("55%".to_string())]);
    }

    #[test]
    fn test_operator_wire_names() {
        for name in [
            "contains",
            "equals",
            "startsWith",
            "endsWith",
            "isEmpty",
            "greaterThan",
            "lessThan",
            "greaterThanOrEqual",
            "lessThanOrEqual",
        ] {
            let operator: FilterOperator = name.parse().unwrap();
            assert_eq!(operator.as_str(), name);
        }
    }
}
