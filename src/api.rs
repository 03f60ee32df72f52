//! REST API router for the coaster registry.
//!
//! Used by the binary and by integration tests. Create with [`create_router`].
//! Uses Extension for state so the router is `Router<()>` and works with `into_make_service()`.

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Extension, FromRequest, Path},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use log::{error, warn};
use std::sync::Arc;

use crate::error::{RegistryError, RegistryResult};
use crate::registry::CoasterRegistry;
use crate::types::{CoasterId, CoasterUpdate, NewCoaster, NewWagon, WagonId};

/// Shared app state: one registry (and so one store lock) per process.
#[derive(Clone)]
pub struct AppState {
    pub(crate) registry: Arc<CoasterRegistry>,
}

/// Builds the REST router over `registry`. Returns `Router<()>` so you can call
/// `.into_make_service()` for `axum::serve`.
pub fn create_router(registry: CoasterRegistry) -> Router<()> {
    let state = AppState {
        registry: Arc::new(registry),
    };
    Router::new()
        .route("/health", get(health))
        .route("/api/coasters", get(list_coasters).post(create_coaster))
        .route("/api/coasters/:coaster_id", get(get_coaster).put(update_coaster))
        .route("/api/coasters/:coaster_id/wagons", post(add_wagon))
        .route("/api/coasters/:coaster_id/wagons/:wagon_id", delete(remove_wagon))
        .layer(Extension(state))
}

/// JSON body extractor that answers malformed bodies with 400 and an `error` field.
struct JsonBody<T>(T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: axum::extract::Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                warn!("rejected request body status={} error={}", rejection.status(), rejection.body_text());
                Err(error_body(StatusCode::BAD_REQUEST, rejection.body_text()))
            }
        }
    }
}

/// Like [`JsonBody`], but a missing body or a non-JSON content type yields `T::default()`.
/// A JSON body that fails to parse is still a 400.
struct OptionalJsonBody<T>(T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for OptionalJsonBody<T>
where
    T: serde::de::DeserializeOwned + Default + Send,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: axum::extract::Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| error_body(StatusCode::BAD_REQUEST, rejection.body_text()))?;
        if !is_json || bytes.is_empty() {
            return Ok(OptionalJsonBody(T::default()));
        }
        match Json::<T>::from_bytes(&bytes) {
            Ok(Json(value)) => Ok(OptionalJsonBody(value)),
            Err(rejection) => {
                warn!("rejected request body status={} error={}", rejection.status(), rejection.body_text());
                Err(error_body(StatusCode::BAD_REQUEST, rejection.body_text()))
            }
        }
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| ct.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

/// Runs a registry call on the blocking pool; the registry does file I/O under its lock.
async fn with_registry<T, F>(state: &AppState, f: F) -> RegistryResult<T>
where
    F: FnOnce(&CoasterRegistry) -> RegistryResult<T> + Send + 'static,
    T: Send + 'static,
{
    let registry = Arc::clone(&state.registry);
    tokio::task::spawn_blocking(move || f(&registry)).await?
}

fn error_body(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "error": message.into() }))).into_response()
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        let status = match &self {
            RegistryError::Validation { .. } => StatusCode::BAD_REQUEST,
            RegistryError::CoasterNotFound(_) | RegistryError::WagonNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            RegistryError::CorruptData { .. }
            | RegistryError::Serialize(_)
            | RegistryError::Io(_)
            | RegistryError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if self.is_client_error() {
            warn!("request failed status={} error={}", status.as_u16(), self);
        } else {
            error!("request failed status={} error={}", status.as_u16(), self);
        }
        let message = match &self {
            RegistryError::Validation { field } => format!("all fields are required: missing {}", field),
            RegistryError::CoasterNotFound(_) => "coaster not found".to_string(),
            RegistryError::WagonNotFound { .. } => "wagon not found".to_string(),
            RegistryError::CorruptData { .. } => "coaster store is unreadable".to_string(),
            RegistryError::Serialize(_) | RegistryError::Io(_) => "coaster store write failed".to_string(),
            RegistryError::Task(_) => "internal error".to_string(),
        };
        error_body(status, message)
    }
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

async fn list_coasters(Extension(state): Extension<AppState>) -> Response {
    match with_registry(&state, |r| r.list()).await {
        Ok(coasters) => (StatusCode::OK, Json(coasters)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn get_coaster(
    Extension(state): Extension<AppState>,
    Path(coaster_id): Path<String>,
) -> Response {
    let id = CoasterId(coaster_id);
    match with_registry(&state, move |r| r.get(&id)).await {
        Ok(coaster) => (StatusCode::OK, Json(coaster)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn create_coaster(
    Extension(state): Extension<AppState>,
    JsonBody(body): JsonBody<NewCoaster>,
) -> Response {
    match with_registry(&state, move |r| r.create(body)).await {
        Ok(coaster) => (StatusCode::CREATED, Json(coaster)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn update_coaster(
    Extension(state): Extension<AppState>,
    Path(coaster_id): Path<String>,
    OptionalJsonBody(body): OptionalJsonBody<CoasterUpdate>,
) -> Response {
    let id = CoasterId(coaster_id);
    match with_registry(&state, move |r| r.update(&id, body)).await {
        Ok(coaster) => (StatusCode::OK, Json(coaster)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn add_wagon(
    Extension(state): Extension<AppState>,
    Path(coaster_id): Path<String>,
    JsonBody(body): JsonBody<NewWagon>,
) -> Response {
    let id = CoasterId(coaster_id);
    match with_registry(&state, move |r| r.add_wagon(&id, body)).await {
        Ok(wagon) => (StatusCode::CREATED, Json(wagon)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn remove_wagon(
    Extension(state): Extension<AppState>,
    Path((coaster_id, wagon_id)): Path<(String, String)>,
) -> Response {
    let (coaster_id, wagon_id) = (CoasterId(coaster_id), WagonId(wagon_id));
    match with_registry(&state, move |r| r.remove_wagon(&coaster_id, &wagon_id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
