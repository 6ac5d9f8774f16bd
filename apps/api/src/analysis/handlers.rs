use anyhow::Context;
use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::analysis::models::AnalysisResult;
use crate::catalog::{match_jobs, MatchedJob};
use crate::errors::AppError;
use crate::extraction::{is_accepted_mime, TempDocument};
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";

#[derive(Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub analysis: AnalysisResult,
    pub jobs: Vec<MatchedJob>,
}

/// POST /api/upload
///
/// Multipart body with the document in the `resume` field. The document is
/// held in a temporary file that is removed once text is extracted, or when
/// the request is abandoned.
#[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let document = read_resume(&mut multipart).await?;
    info!("Received {} resume", document.mime());

    let text = tokio::task::spawn_blocking(move || document.extract_text())
        .await
        .context("Extraction task failed")??;

    let analysis = state.analyzer.analyze(&text).await;
    let catalog = state.catalog.snapshot();
    let jobs = match_jobs(analysis.domain, &analysis.skills, &catalog);
    info!(
        fallback = analysis.is_fallback(),
        "Analysis complete: domain={}, {} skills, {} jobs",
        analysis.domain,
        analysis.skills.len(),
        jobs.len()
    );

    Ok(Json(UploadResponse {
        message: "Analysis complete".to_string(),
        analysis,
        jobs,
    }))
}

/// Pulls the `resume` field out of the form and persists it.
async fn read_resume(multipart: &mut Multipart) -> Result<TempDocument, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }

        let mime = field
            .content_type()
            .map(str::to_string)
            .ok_or_else(|| AppError::UnsupportedFormat("missing content type".to_string()))?;
        if !is_accepted_mime(&mime) {
            return Err(AppError::UnsupportedFormat(mime));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?;
        if bytes.is_empty() {
            return Err(AppError::Validation("No file uploaded.".to_string()));
        }

        let document =
            TempDocument::persist(&bytes, &mime).context("Failed to store uploaded document")?;
        return Ok(document);
    }

    Err(AppError::Validation("No file uploaded.".to_string()))
}
