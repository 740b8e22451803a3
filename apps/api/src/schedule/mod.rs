pub mod recommender;

use serde::{Deserialize, Serialize};

pub use recommender::recommend_schedule;

/// Describes the site being quoted. Feeds the schedule recommender and the
/// facility summary in the exported agreement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacilityProfile {
    /// Cleaning visits per week, 0–7.
    pub days_per_week: u8,
    pub offices: u32,
    pub conference_rooms: u32,
    pub break_rooms: u32,
    pub bathrooms: u32,
    pub kitchens: u32,
    pub locker_rooms: u32,
    /// Free-text flooring description, scanned against the keyword table in
    /// [`recommender`].
    pub floor_types: String,
    pub day_porter_needed: bool,
    /// Set by callers from the pricing config when a deep clean is part of
    /// the job; drives the monthly deep-clean placeholder row.
    pub deep_clean_planned: bool,
}

/// One task entry in the cleaning schedule. The frequency flags are
/// independent: a task may be marked in more than one column, or none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub task: String,
    pub daily: bool,
    pub weekly: bool,
    pub monthly: bool,
}

impl ScheduleRow {
    pub fn new(task: impl Into<String>, daily: bool, weekly: bool, monthly: bool) -> Self {
        Self {
            task: task.into(),
            daily,
            weekly,
            monthly,
        }
    }
}
