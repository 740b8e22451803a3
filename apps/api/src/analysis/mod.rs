//! RFP/PWS analysis — extracts text from uploaded solicitation documents,
//! asks the LLM for drafted proposal content, and merges the result into a
//! draft. The merge is always a wholesale replace, never partial.

pub mod extract;
pub mod prompts;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::proposal::models::ProposalDraft;
use crate::schedule::ScheduleRow;

use prompts::{RFP_ANALYSIS_PROMPT_TEMPLATE, RFP_ANALYSIS_SYSTEM};

/// Character budget for the text sent to the LLM. Longer inputs are
/// truncated, matching the single-call analysis contract.
pub const MAX_ANALYSIS_CHARS: usize = 120_000;

/// Structured output of an RFP/PWS analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RfpAnalysis {
    pub cleaning_plan_draft: String,
    pub scope_of_work_draft: String,
    pub schedule_rows: Vec<ScheduleRow>,
    pub clarifying_questions: Vec<String>,
}

/// Truncates analysis input to [`MAX_ANALYSIS_CHARS`] characters, on a
/// character boundary.
pub fn truncate_for_analysis(text: &str) -> &str {
    match text.char_indices().nth(MAX_ANALYSIS_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Runs one LLM analysis over the extracted solicitation text.
pub async fn analyze_rfp(text: &str, llm: &LlmClient) -> Result<RfpAnalysis, AppError> {
    let prompt = RFP_ANALYSIS_PROMPT_TEMPLATE.replace("{rfp_text}", truncate_for_analysis(text));
    llm.complete_json::<RfpAnalysis>(RFP_ANALYSIS_SYSTEM, &prompt)
        .await
        .map_err(|e| AppError::Llm(format!("RFP analysis failed: {e}")))
}

fn default_true() -> bool {
    true
}

/// Request body for merging an analysis into a draft. Each flag replaces
/// the corresponding draft field in full when set.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplyAnalysisRequest {
    pub analysis: RfpAnalysis,
    #[serde(default = "default_true")]
    pub apply_cleaning_plan: bool,
    #[serde(default = "default_true")]
    pub apply_scope_of_work: bool,
    #[serde(default = "default_true")]
    pub apply_schedule: bool,
}

/// Merges an analysis into a draft: full replace of the selected fields,
/// everything else untouched.
pub fn apply_analysis(draft: &mut ProposalDraft, request: &ApplyAnalysisRequest) {
    if request.apply_cleaning_plan {
        draft.inputs.cleaning_plan = request.analysis.cleaning_plan_draft.clone();
    }
    if request.apply_scope_of_work {
        draft.inputs.scope_of_work = request.analysis.scope_of_work_draft.clone();
    }
    if request.apply_schedule {
        draft.schedule = request.analysis.schedule_rows.clone();
    }
}
