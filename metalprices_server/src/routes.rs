//! Axum router wiring and request handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use metalprices_lib::status::MAX_LIST;
use metalprices_lib::validation::{self, MAX_CLIENT_NAME_LENGTH};
use metalprices_lib::{NormalizedPrice, PriceAggregator, StatusCheck, StatusStore};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;

pub const ROOT_MESSAGE: &str = "Simplify Money - Metal Prices API";

#[derive(Clone)]
pub struct AppState {
    pub aggregator: PriceAggregator,
    pub status: Arc<StatusStore>,
}

#[derive(Debug, Deserialize)]
pub struct StatusCheckCreate {
    pub client_name: String,
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/api", get(root))
        .route("/api/", get(root))
        .route("/api/metals", get(list_metals))
        .route("/api/metals/:metal", get(get_metal))
        .route("/api/status", get(list_status_checks).post(create_status_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn root() -> Json<Value> {
    Json(json!({ "message": ROOT_MESSAGE }))
}

async fn list_metals(State(state): State<AppState>) -> Result<Json<Vec<NormalizedPrice>>, ApiError> {
    let prices = state.aggregator.resolve_all().await?;
    Ok(Json(prices))
}

async fn get_metal(
    State(state): State<AppState>,
    Path(metal): Path<String>,
) -> Result<Json<NormalizedPrice>, ApiError> {
    let metal = validation::validate_metal_name(&metal)?;
    let price = state.aggregator.resolve(metal).await?;
    Ok(Json(price))
}

async fn create_status_check(
    State(state): State<AppState>,
    payload: Result<Json<StatusCheckCreate>, JsonRejection>,
) -> Result<Json<StatusCheck>, ApiError> {
    let Json(input) = payload?;
    let client_name = validation::sanitize_text(&input.client_name, MAX_CLIENT_NAME_LENGTH)?;
    let store = Arc::clone(&state.status);
    let check = tokio::task::spawn_blocking(move || store.insert(&client_name)).await??;
    Ok(Json(check))
}

async fn list_status_checks(
    State(state): State<AppState>,
) -> Result<Json<Vec<StatusCheck>>, ApiError> {
    let store = Arc::clone(&state.status);
    let checks = tokio::task::spawn_blocking(move || store.list(MAX_LIST)).await??;
    Ok(Json(checks))
}
