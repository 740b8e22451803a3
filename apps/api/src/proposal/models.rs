use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pricing::totals::PricingConfig;
use crate::schedule::{FacilityProfile, ScheduleRow};

/// Who supplies a consumable (hand soap, paper towels, toilet paper).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provider {
    #[default]
    Contractor,
    Client,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Contractor => write!(f, "Contractor"),
            Provider::Client => write!(f, "Client"),
        }
    }
}

fn default_net_terms() -> u32 {
    30
}

/// Contract parameters that flow straight into the agreement document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProposalInputs {
    pub client: String,
    pub facility_name: String,
    pub service_begin_date: String,
    pub service_end_date: String,
    pub service_addresses: Vec<String>,
    pub cleaning_times: String,
    #[serde(default = "default_net_terms")]
    pub net_terms: u32,
    pub hand_soap: Provider,
    pub paper_towels: Provider,
    pub toilet_paper: Provider,
    pub include_cover_page: bool,
    pub cover_letter_body: String,
    pub cleaning_plan: String,
    pub scope_of_work: String,
    pub notes: String,
}

impl Default for ProposalInputs {
    fn default() -> Self {
        Self {
            client: String::new(),
            facility_name: String::new(),
            service_begin_date: String::new(),
            service_end_date: String::new(),
            service_addresses: Vec::new(),
            cleaning_times: String::new(),
            net_terms: default_net_terms(),
            hand_soap: Provider::default(),
            paper_towels: Provider::default(),
            toilet_paper: Provider::default(),
            include_cover_page: false,
            cover_letter_body: String::new(),
            cleaning_plan: String::new(),
            scope_of_work: String::new(),
            notes: String::new(),
        }
    }
}

/// One in-flight proposal: contract inputs, pricing, facility, and the
/// editable schedule. Session-scoped; nothing here outlives the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalDraft {
    pub id: Uuid,
    pub inputs: ProposalInputs,
    pub pricing: PricingConfig,
    pub facility: FacilityProfile,
    pub schedule: Vec<ScheduleRow>,
    pub updated_at: DateTime<Utc>,
}

/// Client payload for creating or replacing a draft. A missing schedule
/// means "recommend one from the facility profile".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DraftPayload {
    pub inputs: ProposalInputs,
    pub pricing: PricingConfig,
    pub facility: FacilityProfile,
    pub schedule: Option<Vec<ScheduleRow>>,
}
