use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

use shelf_repo::{BookFilter, WriteKind};
use shelf_types::{fields_from_json, Book, BookId, Fields};

use crate::error::{ApiError, Operation};
use crate::state::AppState;

type ApiResult = Result<Response, ApiError>;

/// Body of `GET /`.
#[derive(Debug, Serialize)]
pub struct BooksResponse {
    pub books: Vec<Book>,
}

/// Health check handler.
pub async fn health_handler() -> &'static str {
    "ok"
}

/// Info handler.
pub async fn info_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    let books = state.repo.store().count().ok();
    Json(json!({
        "name": "bookshelf",
        "version": env!("CARGO_PKG_VERSION"),
        "collection": state.config.collection,
        "books": books,
    }))
}

pub async fn list_books(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult {
    let filter = BookFilter::from_params(params)?;
    let books = state
        .repo
        .list(&filter)
        .map_err(|e| ApiError::from_repository(e, Operation::List, ""))?;
    Ok(Json(BooksResponse { books }).into_response())
}

pub async fn get_book(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult {
    let id = path_id(path)?;
    let book = state
        .repo
        .get(&id)
        .map_err(|e| ApiError::from_repository(e, Operation::Get, &id))?;
    Ok((StatusCode::OK, location(&book.id), Json(book)).into_response())
}

pub async fn create_book(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> ApiResult {
    let fields = request_fields(body)?;
    let book = state
        .repo
        .create(fields)
        .map_err(|e| ApiError::from_repository(e, Operation::Create, ""))?;
    Ok((StatusCode::CREATED, location(&book.id), Json(book)).into_response())
}

pub async fn replace_book(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> ApiResult {
    let id = path_id(path)?;
    let fields = request_fields(body)?;
    let upserted = state
        .repo
        .replace(&id, fields)
        .map_err(|e| ApiError::from_repository(e, Operation::Replace, &id))?;
    let status = match upserted.kind {
        WriteKind::Created => StatusCode::CREATED,
        WriteKind::Replaced => StatusCode::OK,
    };
    let book = upserted.book;
    Ok((status, location(&book.id), Json(book)).into_response())
}

pub async fn update_book(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> ApiResult {
    let id = path_id(path)?;
    let patch = request_fields(body)?;
    let patched = state
        .repo
        .update(&id, patch)
        .map_err(|e| ApiError::from_repository(e, Operation::Update, &id))?;
    let body = json!({
        "link": format!("/{}", patched.id),
        "matched": patched.matched_count,
        "modified": patched.modified_count,
    });
    Ok((StatusCode::OK, location(&patched.id), Json(body)).into_response())
}

pub async fn delete_book(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult {
    let id = path_id(path)?;
    let deleted = state
        .repo
        .delete(&id)
        .map_err(|e| ApiError::from_repository(e, Operation::Delete, &id))?;
    let message = format!("Object with id: {deleted} deleted successfully");
    Ok(Json(json!({ "message": message })).into_response())
}

fn location(id: &BookId) -> [(header::HeaderName, String); 1] {
    [(header::LOCATION, format!("/{id}"))]
}

/// A path segment that does not decode to UTF-8 cannot be a valid id.
fn path_id(path: Result<Path<String>, PathRejection>) -> Result<String, ApiError> {
    let Path(id) = path.map_err(|e| {
        tracing::debug!(error = %e.body_text(), "unreadable path identifier");
        ApiError::InvalidIdentifier
    })?;
    Ok(id)
}

fn request_fields(
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Fields, ApiError> {
    let Json(value) = body.map_err(|e| ApiError::InvalidBody(e.body_text()))?;
    fields_from_json(value).map_err(|e| ApiError::InvalidBody(e.to_string()))
}
