use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::api::models::{SearchResponse, SimpleSearchRequest};
use crate::api::AppState;
use crate::db::Database;
use crate::errors::HoundError;
use crate::models::Collection;
use crate::search::{AdvancedQuery, AdvancedSearchForm, CatalogSnapshot, SearchEngine, SuggestedAdvancedPath};
use crate::suggestions::SuggestionEngine;

fn simple_both(db: &Database, text: &str) -> Result<SearchResponse, HoundError> {
    let engine = SearchEngine::new(db);
    let exploits = engine.search_in_db(text, Collection::Exploits)?;
    let shellcodes = engine.search_in_db(text, Collection::Shellcodes)?;
    Ok(SearchResponse::new(text.to_string(), &exploits, &shellcodes))
}

fn advanced_both(snapshot: CatalogSnapshot, query: &AdvancedQuery) -> SearchResponse {
    let (exploits, shellcodes) = snapshot.search_advanced(query);
    SearchResponse::new(query.text.clone(), &exploits, &shellcodes)
}

/// Validation failures echo the submitted form so the client can re-render it.
fn form_error(err: HoundError, form: &AdvancedSearchForm) -> (StatusCode, Json<Value>) {
    let status = err.status_code();
    let mut body = json!({ "error": err.to_string() });
    if err.is_validation() {
        body["form"] = json!(form);
    }
    if matches!(err, HoundError::InvalidDateRange) {
        body["date_range_error"] = json!(err.to_string());
    }
    (status, Json(body))
}

fn plain_error(err: HoundError) -> (StatusCode, Json<Value>) {
    (err.status_code(), Json(json!({ "error": err.to_string() })))
}

pub async fn simple_search(
    State(state): State<AppState>,
    Json(req): Json<SimpleSearchRequest>,
) -> Result<Json<SearchResponse>, HoundError> {
    if req.search_text.trim().is_empty() {
        return Err(HoundError::Validation("search_text is required".into()));
    }

    let outcome = SuggestionEngine::new(&state.db).annotate(&req.search_text)?;
    let mut response = simple_both(&state.db, &outcome.search_text)?;
    info!(
        input = %req.search_text,
        searched = %outcome.search_text,
        exploits = response.n_exploits_results,
        shellcodes = response.n_shellcodes_results,
        "Search"
    );
    response.suggested_search_text = Some(outcome.suggested_search_text);
    Ok(Json(response))
}

/// Follow-up of a proposed suggestion: the input is used verbatim.
pub async fn suggested_search(
    State(state): State<AppState>,
    Path(input): Path<String>,
) -> Result<Json<SearchResponse>, HoundError> {
    Ok(Json(simple_both(&state.db, &input)?))
}

pub async fn advanced_search(
    State(state): State<AppState>,
    Json(form): Json<AdvancedSearchForm>,
) -> Result<Json<SearchResponse>, (StatusCode, Json<Value>)> {
    let snapshot = SearchEngine::new(&state.db).snapshot().map_err(plain_error)?;
    let outcome = SuggestionEngine::new(&state.db).annotate(&form.search_text).map_err(plain_error)?;
    let query = form
        .resolve(&outcome.search_text, &snapshot.enumerations())
        .map_err(|e| form_error(e, &form))?;

    let mut response = advanced_both(snapshot, &query);
    info!(
        input = %form.search_text,
        searched = %query.text,
        operator = ?query.operator,
        exploits = response.n_exploits_results,
        shellcodes = response.n_shellcodes_results,
        "Advanced search"
    );

    if !outcome.suggested_search_text.is_empty() {
        response.relative_suggested_link = Some(form.suggested_link(&outcome.suggested_search_text));
    }
    response.suggested_search_text = Some(outcome.suggested_search_text);
    response.form = Some(form);
    Ok(Json(response))
}

pub async fn suggested_search_advanced(
    State(state): State<AppState>,
    Path(path): Path<SuggestedAdvancedPath>,
) -> Result<Json<SearchResponse>, (StatusCode, Json<Value>)> {
    let form = path.into_form();
    let snapshot = SearchEngine::new(&state.db).snapshot().map_err(plain_error)?;
    let query = form
        .resolve(&form.search_text, &snapshot.enumerations())
        .map_err(|e| form_error(e, &form))?;

    let mut response = advanced_both(snapshot, &query);
    response.form = Some(form);
    Ok(Json(response))
}
