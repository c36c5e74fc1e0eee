use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::api::models::SuggestionRequest;
use crate::api::AppState;
use crate::errors::{with_retry, HoundError};
use crate::suggestions::SuggestionEngine;

pub async fn list_suggestions(State(state): State<AppState>) -> Result<Json<Value>, HoundError> {
    let suggestions = SuggestionEngine::new(&state.db).list_suggestions()?;
    Ok(Json(json!({ "suggestions": suggestions, "total": suggestions.len() })))
}

pub async fn add_suggestion(
    State(state): State<AppState>,
    Json(req): Json<SuggestionRequest>,
) -> Result<(StatusCode, Json<Value>), HoundError> {
    let db = &state.db;
    let req = &req;
    let stored = with_retry("add_suggestion", &state.retry, || async move {
        SuggestionEngine::new(db).add_suggestion(&req.searched, &req.suggestion, req.autoreplacement)
    })
    .await?;

    let suggestions = SuggestionEngine::new(&state.db).list_suggestions()?;
    Ok((
        StatusCode::OK,
        Json(json!({ "suggestion": stored, "suggestions": suggestions })),
    ))
}

pub async fn delete_suggestion(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let engine = SuggestionEngine::new(&state.db);
    let engine_ref = &engine;
    let outcome = with_retry("delete_suggestion", &state.retry, || async move {
        engine_ref.delete_suggestion(id)
    })
    .await;

    let suggestions = engine.list_suggestions()
        .map_err(|e| (e.status_code(), Json(json!({"error": e.to_string()}))))?;

    match outcome {
        Ok(()) => Ok(Json(json!({ "deleted": true, "suggestions": suggestions }))),
        Err(e) => Err((
            e.status_code(),
            Json(json!({ "suggestion_error": e.to_string(), "error": e.to_string(), "suggestions": suggestions })),
        )),
    }
}
