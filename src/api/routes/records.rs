use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::api::AppState;
use crate::db::RecordStore;
use crate::errors::HoundError;
use crate::models::Collection;
use crate::presentation::{load_source_code, CodeView};

async fn view_code(state: &AppState, collection: Collection, id: i64) -> Result<(StatusCode, Json<Value>), HoundError> {
    let record = state.db.record(collection, id)?
        .ok_or_else(|| HoundError::RecordNotFound(format!("{} {}", collection, id)))?;

    let view = load_source_code(&state.artifacts_dir, &record).await?;
    let status = match view {
        CodeView::Found(_) => StatusCode::OK,
        CodeView::Missing { .. } => StatusCode::NOT_FOUND,
    };
    Ok((status, Json(json!(view))))
}

pub async fn view_exploit_code(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<Value>), HoundError> {
    view_code(&state, Collection::Exploits, id).await
}

pub async fn view_shellcode_code(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<Value>), HoundError> {
    view_code(&state, Collection::Shellcodes, id).await
}
