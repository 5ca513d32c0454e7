//! Axum route handlers for the Generation API.
//!
//! Every generation endpoint answers 200 with display text, even when the
//! remote call failed; only malformed requests are rejected.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::client::Generation;
use crate::generation::document::{
    generate_full_document, generate_resume_sections, FullDocument, ResumeSections,
};
use crate::generation::profile::{Profile, ProfileInput};
use crate::generation::prompts::{
    accomplishment_prompt, cover_letter_prompt, portfolio_prompt, summary_prompt,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub profile: ProfileInput,
}

#[derive(Debug, Deserialize)]
pub struct ItemRequest {
    pub profile: ProfileInput,
    pub item: String,
}

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    pub profile: ProfileInput,
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerationResponse {
    pub text: String,
    pub warnings: Vec<String>,
}

impl From<Generation> for GenerationResponse {
    fn from(generation: Generation) -> Self {
        Self {
            text: generation.text,
            warnings: generation.warnings,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FullDocumentResponse {
    pub markdown: String,
    pub document: FullDocument,
}

/// Rejects blank items. The item itself is passed on untouched.
fn require_item(item: &str) -> Result<(), AppError> {
    if item.trim().is_empty() {
        return Err(AppError::Validation("item cannot be empty".to_string()));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/generate/summary
pub async fn handle_summary(
    State(state): State<AppState>,
    Json(request): Json<ProfileRequest>,
) -> Json<GenerationResponse> {
    let profile = Profile::from(request.profile);
    let generation = state.generator.generate(&summary_prompt(&profile)).await;
    Json(generation.into())
}

/// POST /api/v1/generate/bullets
///
/// Rewrites one experience or project line as accomplishment-driven bullets.
pub async fn handle_bullets(
    State(state): State<AppState>,
    Json(request): Json<ItemRequest>,
) -> Result<Json<GenerationResponse>, AppError> {
    require_item(&request.item)?;
    let profile = Profile::from(request.profile);

    let generation = state
        .generator
        .generate(&accomplishment_prompt(&profile, &request.item))
        .await;

    Ok(Json(generation.into()))
}

/// POST /api/v1/generate/cover-letter
///
/// General letter, or tailored when `job_description` is present and not blank.
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Json<GenerationResponse> {
    let profile = Profile::from(request.profile);
    let prompt = cover_letter_prompt(&profile, request.job_description.as_deref());
    Json(state.generator.generate(&prompt).await.into())
}

/// POST /api/v1/generate/portfolio
pub async fn handle_portfolio(
    State(state): State<AppState>,
    Json(request): Json<ItemRequest>,
) -> Result<Json<GenerationResponse>, AppError> {
    require_item(&request.item)?;
    let profile = Profile::from(request.profile);

    let generation = state
        .generator
        .generate(&portfolio_prompt(&profile, &request.item))
        .await;

    Ok(Json(generation.into()))
}

/// POST /api/v1/generate/resume
pub async fn handle_resume_sections(
    State(state): State<AppState>,
    Json(request): Json<ProfileRequest>,
) -> Json<ResumeSections> {
    let profile = Profile::from(request.profile);
    Json(generate_resume_sections(&state.generator, &profile).await)
}

/// POST /api/v1/generate/full-document
///
/// Sequential and slow by construction: with the default 7s pacing a profile
/// with two experience lines and two projects takes over 40 seconds.
pub async fn handle_full_document(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Json<FullDocumentResponse> {
    let profile = Profile::from(request.profile);

    let document = generate_full_document(
        &state.generator,
        &profile,
        request.job_description.as_deref(),
        state.document_call_delay,
    )
    .await;

    info!(
        "Full document for '{}' assembled with {} warnings",
        document.name,
        document.warnings.len()
    );

    Json(FullDocumentResponse {
        markdown: document.to_markdown(),
        document,
    })
}
