//! # Catalog REST Routes
//!
//! Axum handlers for the car endpoints. Handlers only parse, dispatch to
//! [`CarStore`] and shape the response.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;

use crate::catalog::{Car, ColumnsResponse};
use crate::store::{CarPage, CarStore, MAX_PAGE_SIZE};

use super::errors::{RestError, RestResult};
use super::parser::{parse_car_id, parse_filter_body, parse_search_query, PageParams};
use super::response::{DeleteResponse, FilterResponse, SingleResponse};

/// Shared state type
type StoreState = State<Arc<CarStore>>;

/// Catalog routes bound to one store
pub struct RestServer {
    store: Arc<CarStore>,
}

impl RestServer {
    pub fn new(store: Arc<CarStore>) -> Self {
        Self { store }
    }

    /// Build the router; mount it under `/api`
    pub fn router(self) -> Router {
        Router::new()
            .route("/cars/all", get(list_all_handler))
            .route("/cars/search", get(search_handler))
            .route("/cars/filter", post(filter_handler))
            .route("/cars", get(list_handler))
            .route("/cars/:id", get(get_handler).delete(delete_handler))
            .route("/metadata", get(metadata_handler))
            .with_state(self.store)
    }
}

/// Up to [`MAX_PAGE_SIZE`] rows for client-side paging
async fn list_all_handler(State(store): StoreState) -> RestResult<Json<Vec<Car>>> {
    let page = store.list(1, MAX_PAGE_SIZE).await?;
    Ok(Json(page.data))
}

async fn list_handler(
    State(store): StoreState,
    Query(query): Query<HashMap<String, String>>,
) -> RestResult<Json<CarPage>> {
    let params = PageParams::parse(&query)?;
    let page = store.list(params.page, params.page_size).await?;
    Ok(Json(page))
}

async fn search_handler(
    State(store): StoreState,
    Query(query): Query<HashMap<String, String>>,
) -> RestResult<Json<Vec<Car>>> {
    let text = parse_search_query(&query)?;
    let cars = store.search(&text).await?;
    Ok(Json(cars))
}

async fn filter_handler(
    State(store): StoreState,
    body: Result<Json<Value>, JsonRejection>,
) -> RestResult<Json<FilterResponse<Car>>> {
    let Json(body) = body.map_err(|e| {
        RestError::InvalidBody(format!("Invalid request body: {}", e.body_text()))
    })?;

    let filters = parse_filter_body(body)?;
    let cars = store.filter(&filters).await?;
    Ok(Json(FilterResponse::new(cars, filters)))
}

async fn get_handler(
    State(store): StoreState,
    Path(raw_id): Path<String>,
) -> RestResult<Json<SingleResponse<Car>>> {
    let id = parse_car_id(&raw_id)?;

    match store.get(id).await? {
        Some(car) => Ok(Json(SingleResponse::new(car))),
        None => Err(RestError::NotFound("Car not found".to_string())),
    }
}

async fn delete_handler(
    State(store): StoreState,
    Path(raw_id): Path<String>,
) -> RestResult<Json<DeleteResponse>> {
    let id = parse_car_id(&raw_id)?;

    if store.delete(id).await? {
        Ok(Json(DeleteResponse::success(id)))
    } else {
        Err(RestError::NotFound(
            "Car not found or already deleted".to_string(),
        ))
    }
}

async fn metadata_handler(State(store): StoreState) -> Json<ColumnsResponse> {
    Json(store.column_metadata())
}
