use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::analysis::extract::extract_text;
use crate::analysis::{analyze_rfp, apply_analysis, ApplyAnalysisRequest, RfpAnalysis};
use crate::document::docx::render_docx;
use crate::document::export::{
    docx_filename, json_filename, snapshot_json, DOCX_CONTENT_TYPE, JSON_CONTENT_TYPE,
};
use crate::document::instructions::assemble_proposal;
use crate::errors::AppError;
use crate::pricing::totals::{compute_totals, DeepCleanOption, PricingConfig, TotalsResult};
use crate::proposal::models::{DraftPayload, ProposalDraft};
use crate::schedule::{recommend_schedule, FacilityProfile, ScheduleRow};
use crate::state::AppState;

fn draft_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Draft {id} not found"))
}

/// Builds a draft from a payload, recommending a schedule when the client
/// did not supply one. The deep-clean placeholder follows the pricing
/// config unless the profile already says otherwise.
fn draft_from_payload(id: Uuid, payload: DraftPayload) -> Result<ProposalDraft, AppError> {
    payload.pricing.validate()?;

    let mut facility = payload.facility;
    if payload.pricing.deep_clean_option != DeepCleanOption::None {
        facility.deep_clean_planned = true;
    }

    let schedule = payload
        .schedule
        .unwrap_or_else(|| recommend_schedule(&facility));

    Ok(ProposalDraft {
        id,
        inputs: payload.inputs,
        pricing: payload.pricing,
        facility,
        schedule,
        updated_at: Utc::now(),
    })
}

/// POST /api/v1/drafts
pub async fn handle_create_draft(
    State(state): State<AppState>,
    Json(payload): Json<DraftPayload>,
) -> Result<(StatusCode, Json<ProposalDraft>), AppError> {
    let draft = draft_from_payload(Uuid::new_v4(), payload)?;
    state.drafts.insert(draft.clone());
    Ok((StatusCode::CREATED, Json(draft)))
}

/// GET /api/v1/drafts/:id
pub async fn handle_get_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProposalDraft>, AppError> {
    let draft = state.drafts.get(&id).ok_or_else(|| draft_not_found(id))?;
    Ok(Json(draft))
}

/// PUT /api/v1/drafts/:id — wholesale replace.
pub async fn handle_replace_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<DraftPayload>,
) -> Result<Json<ProposalDraft>, AppError> {
    if state.drafts.get(&id).is_none() {
        return Err(draft_not_found(id));
    }
    let draft = draft_from_payload(id, payload)?;
    state.drafts.insert(draft.clone());
    Ok(Json(draft))
}

/// DELETE /api/v1/drafts/:id
pub async fn handle_delete_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.drafts.remove(&id).ok_or_else(|| draft_not_found(id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/pricing/totals — stateless calculator.
pub async fn handle_compute_totals(
    Json(config): Json<PricingConfig>,
) -> Result<Json<TotalsResult>, AppError> {
    config.validate()?;
    Ok(Json(compute_totals(&config)))
}

/// POST /api/v1/schedule/recommend — stateless recommender.
pub async fn handle_recommend_schedule(
    Json(profile): Json<FacilityProfile>,
) -> Result<Json<Vec<ScheduleRow>>, AppError> {
    Ok(Json(recommend_schedule(&profile)))
}

/// POST /api/v1/drafts/:id/analyze — multipart RFP/PWS upload.
///
/// Extracted texts from all uploaded files are joined with newlines and
/// analyzed in a single LLM call. The draft is untouched; the analysis is
/// returned for review and applied separately.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<RfpAnalysis>, AppError> {
    if state.drafts.get(&id).is_none() {
        return Err(draft_not_found(id));
    }

    let mut combined = String::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {e}")))?
    {
        let filename = field.file_name().unwrap_or("upload.txt").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Extraction(format!("Failed to read upload '{filename}': {e}")))?;

        let text = extract_text(&filename, &data);
        if !combined.is_empty() {
            combined.push('\n');
        }
        combined.push_str(&text);
    }

    if combined.trim().is_empty() {
        return Err(AppError::Validation(
            "No extractable text in uploaded files".to_string(),
        ));
    }

    let analysis = analyze_rfp(&combined, &state.llm).await?;
    Ok(Json(analysis))
}

/// POST /api/v1/drafts/:id/apply-analysis — full-replace merge.
pub async fn handle_apply_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ApplyAnalysisRequest>,
) -> Result<Json<ProposalDraft>, AppError> {
    let updated = state
        .drafts
        .update(&id, |draft| {
            apply_analysis(draft, &request);
            draft.updated_at = Utc::now();
        })
        .ok_or_else(|| draft_not_found(id))?;
    Ok(Json(updated))
}

fn attachment_headers(content_type: &str, filename: &str) -> [(header::HeaderName, String); 2] {
    [
        (header::CONTENT_TYPE, content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ]
}

/// GET /api/v1/drafts/:id/export/docx
pub async fn handle_export_docx(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let draft = state.drafts.get(&id).ok_or_else(|| draft_not_found(id))?;
    let totals = compute_totals(&draft.pricing);
    let instructions = assemble_proposal(&draft, &totals);
    let bytes = render_docx(&instructions, state.config.docx_template_path.as_deref())?;

    let filename = docx_filename(Utc::now().date_naive());
    Ok((attachment_headers(DOCX_CONTENT_TYPE, &filename), bytes).into_response())
}

/// GET /api/v1/drafts/:id/export/json
pub async fn handle_export_json(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let draft = state.drafts.get(&id).ok_or_else(|| draft_not_found(id))?;
    let totals = compute_totals(&draft.pricing);
    let body = snapshot_json(&draft, &totals)?;

    let filename = json_filename(Utc::now().date_naive());
    Ok((attachment_headers(JSON_CONTENT_TYPE, &filename), body).into_response())
}
