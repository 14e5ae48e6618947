//! Pack endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use quiz_core::{build_report, resolve_pack_id, QuizSession};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/packs
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<PackQuery>,
) -> Result<Json<PackListResponse>> {
    let manifest = state.store.manifest().await?;
    let selected = resolve_pack_id(
        query.pack.as_deref(),
        &state.config.default_pack_id,
        &manifest.packs,
    )
    .to_string();

    Ok(Json(PackListResponse {
        packs: manifest.packs,
        selected,
    }))
}

/// GET /api/packs/:id
pub async fn get(
    State(state): State<AppState>,
    Path(pack_id): Path<String>,
) -> Result<Json<PackView>> {
    let pack = state.store.load(&pack_id).await?;

    Ok(Json(PackView {
        questions: pack.questions.iter().map(QuestionView::from_question).collect(),
        id: pack.id,
        title: pack.title,
        passage: pack.passage,
    }))
}

/// POST /api/packs/:id/mark
pub async fn mark(
    State(state): State<AppState>,
    Path(pack_id): Path<String>,
    Json(payload): Json<MarkRequest>,
) -> Result<Json<MarkResponse>> {
    let pack = state.store.load(&pack_id).await?;
    let mut session = QuizSession::new(pack);

    for submitted in payload.answers {
        let index = session.index_of(&submitted.question_id).ok_or_else(|| {
            ApiError::BadRequest(format!("Unknown question: {}", submitted.question_id))
        })?;
        session.set_answer(index, submitted.answer)?;
    }

    session
        .mark_all()
        .ok_or_else(|| ApiError::BadRequest(format!("Pack {} has no questions", pack_id)))?;
    let report = build_report(&session)
        .ok_or_else(|| ApiError::Internal("Marking pass produced no report".to_string()))?;

    tracing::info!(
        "Marked pack {}: {}/{}",
        pack_id,
        report.total_score,
        report.total_max
    );

    Ok(Json(MarkResponse {
        pack_id,
        report,
        marked_at: Utc::now(),
    }))
}
