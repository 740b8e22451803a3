//! Schedule Recommender — derives a default task/frequency table from
//! facility attributes.
//!
//! Deterministic and order-preserving: the same profile always yields the
//! same rows in the same order. It never fails; absent data produces a
//! shorter list.

use super::{FacilityProfile, ScheduleRow};

/// Floor keywords, matched case-insensitively as substrings of
/// `FacilityProfile::floor_types`. Kept as explicit tables so the rule set
/// is independently testable.
const CARPET_KEYWORDS: &[&str] = &["carpet"];
const HARD_FLOOR_KEYWORDS: &[&str] = &["vct", "vinyl", "epoxy", "tile", "hard", "concrete"];
/// Resilient flooring gets maintenance rows on top of the hard-floor rows.
const RESILIENT_KEYWORDS: &[&str] = &["vct", "vinyl"];

fn mentions_any(floor_types_lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| floor_types_lower.contains(kw))
}

/// Which frequency column visit-driven tasks land in, by days per week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitTier {
    /// 3+ days per week: routine tasks are marked daily.
    Daily,
    /// 1–2 days per week: routine tasks drop to weekly.
    Weekly,
    /// No recurring visits: visit-driven rows are omitted entirely.
    /// Monthly-fixed rows are still emitted.
    Unvisited,
}

fn visit_tier(days_per_week: u8) -> VisitTier {
    match days_per_week {
        0 => VisitTier::Unvisited,
        1 | 2 => VisitTier::Weekly,
        _ => VisitTier::Daily,
    }
}

/// Produces the default cleaning schedule for a facility.
pub fn recommend_schedule(profile: &FacilityProfile) -> Vec<ScheduleRow> {
    let tier = visit_tier(profile.days_per_week);
    let mut rows = Vec::new();

    let push_routine = |rows: &mut Vec<ScheduleRow>, task: &str| match tier {
        VisitTier::Daily => rows.push(ScheduleRow::new(task, true, false, false)),
        VisitTier::Weekly => rows.push(ScheduleRow::new(task, false, true, false)),
        VisitTier::Unvisited => {}
    };
    // Weekly-fixed rows also depend on recurring visits, so they are
    // omitted for an unvisited site.
    let push_weekly = |rows: &mut Vec<ScheduleRow>, task: &str| {
        if tier != VisitTier::Unvisited {
            rows.push(ScheduleRow::new(task, false, true, false));
        }
    };
    let push_monthly =
        |rows: &mut Vec<ScheduleRow>, task: &str| rows.push(ScheduleRow::new(task, false, false, true));

    push_routine(&mut rows, "Empty trash & replace liners");
    push_routine(&mut rows, "Clean/disinfect high-touch points");

    if profile.bathrooms > 0 {
        push_routine(&mut rows, "Clean and sanitize restrooms, restock dispensers");
    }
    if profile.break_rooms > 0 || profile.kitchens > 0 {
        push_routine(&mut rows, "Clean break room/kitchen counters, sinks, and tables");
    }
    if profile.locker_rooms > 0 {
        push_routine(&mut rows, "Clean and disinfect locker rooms");
    }

    let floors = profile.floor_types.to_lowercase();
    if mentions_any(&floors, CARPET_KEYWORDS) {
        push_routine(&mut rows, "Vacuum carpeted areas");
        push_weekly(&mut rows, "Spot-treat carpet stains");
        push_monthly(&mut rows, "Carpet extraction cleaning");
    }
    if mentions_any(&floors, HARD_FLOOR_KEYWORDS) {
        push_routine(&mut rows, "Dust mop and damp mop hard-surface floors");
        push_weekly(&mut rows, "Machine scrub hard-surface floors");
    }
    if mentions_any(&floors, RESILIENT_KEYWORDS) {
        push_monthly(&mut rows, "VCT maintenance (buff/burnish)");
        push_monthly(&mut rows, "Strip and wax VCT/vinyl flooring");
    }

    push_monthly(&mut rows, "High dusting (vents, ledges, partitions)");
    push_monthly(&mut rows, "Detail baseboards, corners, and edges");

    if profile.day_porter_needed {
        rows.push(ScheduleRow::new("Day porter services", true, false, false));
    }
    if profile.deep_clean_planned {
        push_monthly(&mut rows, "Deep clean tasks (per agreement)");
    }

    rows
}
