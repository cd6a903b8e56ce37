//! Axum route handlers for the Remodel API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::portfolio::PortfolioSnapshot;
use crate::remodel::keywords::Keyword;
use crate::remodel::rebuild::{extract_posting, rebuild_portfolio, JobPostingInput};
use crate::remodel::sections::ExtractedSections;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRemodelRequest {
    pub source_type: String,
    pub value: String,
    pub portfolio: PortfolioSnapshot,
}

#[derive(Debug, Serialize)]
pub struct BuildRemodelResponse {
    pub data: PortfolioSnapshot,
    pub keywords: Vec<Keyword>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractPostingRequest {
    pub source_type: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractPostingResponse {
    pub sections: ExtractedSections,
    pub keywords: Vec<Keyword>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/remodel/build
///
/// Reorders the supplied portfolio snapshot against a job posting. The caller
/// owns loading and persisting the snapshot; this endpoint only reorders.
pub async fn handle_build(
    State(state): State<AppState>,
    Json(request): Json<BuildRemodelRequest>,
) -> Result<Json<BuildRemodelResponse>, AppError> {
    let posting = JobPostingInput {
        source_type: request.source_type,
        value: request.value,
    };

    let outcome = rebuild_portfolio(
        &posting,
        request.portfolio,
        state.fetcher.as_ref(),
        state.keywords.as_ref(),
        &state.weights,
    )
    .await?;

    Ok(Json(BuildRemodelResponse {
        data: outcome.data,
        keywords: outcome.keywords,
    }))
}

/// POST /api/v1/remodel/extract
///
/// Returns the extracted qualification sections and derived keywords without
/// touching a portfolio. Useful for previewing extraction before a rebuild.
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(request): Json<ExtractPostingRequest>,
) -> Result<Json<ExtractPostingResponse>, AppError> {
    let posting = JobPostingInput {
        source_type: request.source_type,
        value: request.value,
    };

    let (sections, keywords) =
        extract_posting(&posting, state.fetcher.as_ref(), state.keywords.as_ref()).await?;

    Ok(Json(ExtractPostingResponse { sections, keywords }))
}
