//! Export surface: dated filenames, content types, and the JSON snapshot.

use chrono::NaiveDate;
use serde::Serialize;

use crate::errors::AppError;
use crate::pricing::totals::TotalsResult;
use crate::proposal::models::ProposalDraft;

pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// `NaiveDate` displays as ISO-8601 (`YYYY-MM-DD`), which is exactly the
/// date form the download filenames carry.
pub fn docx_filename(today: NaiveDate) -> String {
    format!("Torus_Cleaning_Agreement_{today}.docx")
}

pub fn json_filename(today: NaiveDate) -> String {
    format!("Torus_Cleaning_Agreement_{today}.json")
}

/// The JSON snapshot artifact: the full draft plus its computed totals.
#[derive(Debug, Serialize)]
pub struct ProposalSnapshot<'a> {
    #[serde(flatten)]
    pub draft: &'a ProposalDraft,
    pub visits_per_month: u32,
    pub totals: &'a TotalsResult,
}

pub fn snapshot_json(draft: &ProposalDraft, totals: &TotalsResult) -> Result<String, AppError> {
    let snapshot = ProposalSnapshot {
        draft,
        visits_per_month: draft.pricing.visits_per_month(),
        totals,
    };
    serde_json::to_string_pretty(&snapshot)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("snapshot serialization failed: {e}")))
}
