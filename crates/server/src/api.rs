// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP API surface.
//!
//! Translates requests into [`BugService`] calls and maps results onto
//! status codes. Request bodies and path ids are validated here, before the
//! service is reached. List filters are never rejected: a value that names
//! no status or priority simply matches nothing.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::fmt::Display;
use std::str::FromStr;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use bt_core::{Bug, BugStats, BugUpdate, NewBug, Priority, Status};

use crate::service::BugService;

/// Errors a handler can return, each with a fixed status code.
#[derive(Debug)]
pub enum ApiError {
    /// The requested id has no record.
    NotFound,
    /// Malformed or out-of-range input.
    Validation(String),
    /// Storage failure. Details are logged, not returned.
    Internal(bt_core::Error),
}

impl From<bt_core::Error> for ApiError {
    fn from(err: bt_core::Error) -> Self {
        match err {
            bt_core::Error::BugNotFound(_) => ApiError::NotFound,
            e if e.is_validation() => ApiError::Validation(e.to_string()),
            e => ApiError::Internal(e),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Bug not found".to_string()),
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Internal(e) => {
                error!("request failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

/// Optional filters for `GET /bugs`, kept as the raw query strings.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
    pub priority: Option<String>,
}

/// Resolve a raw list filter against its exact wire name.
///
/// `Some(None)` means unfiltered. `None` means the value names no variant
/// (including case variants like `Open`), so no record can match.
fn exact_filter<T>(raw: Option<&str>) -> Option<Option<T>>
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = raw else {
        return Some(None);
    };
    match raw.parse::<T>() {
        Ok(value) if value.to_string() == raw => Some(Some(value)),
        Ok(value) => {
            debug!("list filter '{raw}' is not the stored form '{value}'");
            None
        }
        Err(e) => {
            debug!("list filter matches nothing: {e}");
            None
        }
    }
}

/// Build the application router with CORS restricted to `allowed_origin`.
pub fn router(service: BugService, allowed_origin: HeaderValue) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/bugs", get(list_bugs).post(create_bug))
        .route(
            "/bugs/{id}",
            get(get_bug).put(update_bug).delete(delete_bug),
        )
        .route("/stats", get(stats))
        .with_state(service)
        .layer(cors_layer(allowed_origin))
        .layer(TraceLayer::new_for_http())
}

/// Single-origin CORS with credentials; any method and header from it.
///
/// Requests from other origins get no CORS headers at all.
pub fn cors_layer(allowed_origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list([allowed_origin]))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

async fn root() -> Json<Value> {
    Json(json!({ "status": "BugTracker API running" }))
}

async fn list_bugs(
    State(service): State<BugService>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Bug>>, ApiError> {
    let Query(params) = params?;
    let (Some(status), Some(priority)) = (
        exact_filter::<Status>(params.status.as_deref()),
        exact_filter::<Priority>(params.priority.as_deref()),
    ) else {
        return Ok(Json(Vec::new()));
    };
    let bugs = service.list(status, priority).await?;
    Ok(Json(bugs))
}

async fn create_bug(
    State(service): State<BugService>,
    payload: Result<Json<NewBug>, JsonRejection>,
) -> Result<(StatusCode, Json<Bug>), ApiError> {
    let Json(new) = payload?;
    new.validate()?;
    let bug = service.create(new).await?;
    Ok((StatusCode::CREATED, Json(bug)))
}

async fn get_bug(
    State(service): State<BugService>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Bug>, ApiError> {
    let Path(id) = id?;
    Ok(Json(service.get(id).await?))
}

async fn update_bug(
    State(service): State<BugService>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<BugUpdate>, JsonRejection>,
) -> Result<Json<Bug>, ApiError> {
    let Path(id) = id?;
    let Json(update) = payload?;
    update.validate()?;
    Ok(Json(service.update(id, update).await?))
}

async fn delete_bug(
    State(service): State<BugService>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn stats(State(service): State<BugService>) -> Result<Json<BugStats>, ApiError> {
    Ok(Json(service.stats().await?))
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
