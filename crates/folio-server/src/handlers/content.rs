//! Content document API handlers.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;
use serde_json::Value;

use crate::error::ServerError;
use crate::state::AppState;

/// Acknowledgement returned after a successful save.
#[derive(Serialize)]
pub(crate) struct SaveAck {
    status: &'static str,
    message: &'static str,
}

/// Handle GET /api/get/{filename}.
///
/// A document that does not exist yet reads as an empty object, so the
/// editor can open new sections without a separate create step.
pub(crate) async fn get_document(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Json<Value>, ServerError> {
    let value = state.store.load(&filename)?;
    Ok(Json(value))
}

/// Handle POST /api/save/{filename}.
///
/// Replaces the stored document wholesale with the request body.
pub(crate) async fn save_document(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
    Json(value): Json<Value>,
) -> Result<Json<SaveAck>, ServerError> {
    state.store.save(&filename, &value)?;
    Ok(Json(SaveAck {
        status: "success",
        message: "File saved successfully!",
    }))
}
