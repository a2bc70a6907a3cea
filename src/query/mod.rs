//! # Query Construction
//!
//! Builds the dynamic parts of catalog SQL from client input.

pub mod filter;

pub use filter::{compile, BoundValue, FilterCondition, FilterOperator, FilterPlan, WhereClause};
