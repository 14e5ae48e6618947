//! Rubric endpoints

use axum::Json;
use quiz_core::check_marking_config;

use crate::error::Result;
use crate::models::*;

/// POST /api/rubric/check
///
/// Grades one free-text answer against an inline marking config, for pack
/// authors trying out patterns and thresholds.
pub async fn check(Json(payload): Json<RubricCheckRequest>) -> Result<Json<RubricCheckResponse>> {
    let correct = check_marking_config(&payload.answer, &payload.config)?;
    Ok(Json(RubricCheckResponse { correct }))
}
