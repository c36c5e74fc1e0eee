use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::api::AppState;
use crate::errors::HoundError;
use crate::search::{FilterEnumeration, SearchEngine, BOOLEAN_CHOICES, OPERATOR_CHOICES};

fn enumeration_json(e: &FilterEnumeration) -> Value {
    json!({
        "version": e.version(),
        "choices": e.choices(),
    })
}

fn static_choices(choices: &[(usize, &str)]) -> Value {
    Value::Array(
        choices
            .iter()
            .map(|(index, label)| json!({"index": index, "label": label}))
            .collect(),
    )
}

/// Choice lists for the advanced search form, recomputed on every call.
pub async fn get_filters(State(state): State<AppState>) -> Result<Json<Value>, HoundError> {
    let enums = SearchEngine::new(&state.db).enumerations()?;
    Ok(Json(json!({
        "operators": static_choices(&OPERATOR_CHOICES),
        "booleans": static_choices(&BOOLEAN_CHOICES),
        "types": enumeration_json(&enums.types),
        "platforms": enumeration_json(&enums.platforms),
    })))
}
