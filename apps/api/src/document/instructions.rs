//! Document Assembler — turns a proposal draft plus computed totals into an
//! ordered sequence of typed content instructions.
//!
//! The instruction sequence is the whole contract with the document
//! renderer: same draft and totals in, byte-identical sequence out.
//! Format internals live in [`super::docx`].

use rust_decimal::Decimal;
use serde::Serialize;

use crate::pricing::money::format_money;
use crate::pricing::totals::{
    addon_counts, CompensationMode, DeepCleanOption, PricingConfig, PricingMode, TotalsResult,
};
use crate::proposal::models::ProposalDraft;
use crate::schedule::ScheduleRow;

/// Mark used in the schedule table's frequency columns.
pub const CHECK_MARK: &str = "✓";

/// One typed content instruction for the document renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DocInstruction {
    Paragraph {
        text: String,
        bold: bool,
        centered: bool,
    },
    /// A bulleted list item.
    Bullet(String),
    PageBreak,
    /// 4-column table: `Task | Daily | Weekly | Monthly`.
    ScheduleTable(Vec<ScheduleRow>),
}

fn para(text: impl Into<String>) -> DocInstruction {
    DocInstruction::Paragraph {
        text: text.into(),
        bold: false,
        centered: false,
    }
}

fn heading(text: impl Into<String>) -> DocInstruction {
    DocInstruction::Paragraph {
        text: text.into(),
        bold: true,
        centered: false,
    }
}

fn blank() -> DocInstruction {
    para("")
}

/// Assembles the full agreement. Section order is fixed; sections switched
/// off by their flags (cover page) or empty content (cleaning plan, scope)
/// are skipped entirely.
pub fn assemble_proposal(draft: &ProposalDraft, totals: &TotalsResult) -> Vec<DocInstruction> {
    let inputs = &draft.inputs;
    let mut doc = Vec::new();

    if inputs.include_cover_page {
        doc.push(para(&inputs.client));
        doc.push(blank());
        doc.push(para("Re: Janitorial Services Proposal"));
        doc.push(blank());
        doc.push(para(format!("Dear {},", inputs.client)));
        doc.push(blank());
        doc.push(para(&inputs.cover_letter_body));
        doc.push(blank());
        doc.push(para("Respectfully,"));
        doc.push(para("Kara Jubilee\nOwner\nTorus Cleaning Services"));
        doc.push(DocInstruction::PageBreak);
    }

    doc.push(DocInstruction::Paragraph {
        text: "CLEANING SERVICE AGREEMENT".to_string(),
        bold: true,
        centered: true,
    });

    doc.push(para(format!("Client: {}", inputs.client)));
    doc.push(para(format!("Facility: {}", inputs.facility_name)));
    doc.push(para("Service Addresses:"));
    for address in &inputs.service_addresses {
        doc.push(DocInstruction::Bullet(address.clone()));
    }

    doc.push(blank());
    doc.push(para(format!(
        "Contract period: {} to {}. Cleaning {} days per week between {}.",
        inputs.service_begin_date,
        inputs.service_end_date,
        draft.facility.days_per_week,
        inputs.cleaning_times,
    )));

    doc.push(heading("SCOPE OF WORK – CLEANING SCHEDULE"));
    let rows: Vec<ScheduleRow> = draft
        .schedule
        .iter()
        .filter(|r| !r.task.trim().is_empty())
        .cloned()
        .collect();
    doc.push(DocInstruction::ScheduleTable(rows));

    if !inputs.cleaning_plan.trim().is_empty() {
        doc.push(heading("CLEANING PLAN"));
        doc.push(para(&inputs.cleaning_plan));
    }

    if !inputs.scope_of_work.trim().is_empty() {
        doc.push(heading("SCOPE OF WORK"));
        doc.push(para(&inputs.scope_of_work));
    }

    push_pricing_section(&mut doc, &draft.pricing, totals, inputs.net_terms);

    doc.push(heading("GENERAL REQUIREMENTS"));
    doc.push(para(format!(
        "Contractor shall provide all labor, supervision, personnel, and standard cleaning supplies.\n\
         Hand soap: {}\nPaper towels: {}\nToilet paper: {}",
        inputs.hand_soap, inputs.paper_towels, inputs.toilet_paper,
    )));

    doc.push(blank());
    doc.push(heading("NOTES"));
    if inputs.notes.trim().is_empty() {
        doc.push(para("(none)"));
    } else {
        doc.push(para(&inputs.notes));
    }

    doc
}

fn push_pricing_section(
    doc: &mut Vec<DocInstruction>,
    pricing: &PricingConfig,
    totals: &TotalsResult,
    net_terms: u32,
) {
    doc.push(heading("PRICING"));

    let base_line = match pricing.pricing_mode {
        PricingMode::FixedMonthly => format!(
            "Base monthly service price: {}",
            format_money(totals.base_monthly)
        ),
        PricingMode::PerSquareFoot => format!(
            "Base monthly service price: {} ({} per sq ft × {} sq ft)",
            format_money(totals.base_monthly),
            format_money(pricing.rate_per_square_foot),
            pricing.square_footage,
        ),
        PricingMode::PerVisit => format!(
            "Base monthly service price: {} ({} per visit × {} visits/month)",
            format_money(totals.base_monthly),
            format_money(pricing.rate_per_visit),
            pricing.visits_per_month(),
        ),
    };
    doc.push(para(base_line));

    let billed_addons: Vec<_> = pricing
        .additional_services
        .iter()
        .filter(|s| addon_counts(s))
        .collect();
    if !billed_addons.is_empty() {
        let suffix = if pricing.include_addons_in_total {
            "included in monthly total"
        } else {
            "billed separately"
        };
        doc.push(para(format!("Additional services ({suffix}):")));
        for service in billed_addons {
            doc.push(DocInstruction::Bullet(format!(
                "{} — {}",
                service.name,
                format_money(service.price)
            )));
        }
    }

    match pricing.deep_clean_option {
        DeepCleanOption::None => {}
        DeepCleanOption::OneTime => doc.push(para(format!(
            "One-time deep clean (billed separately): {}",
            format_money(totals.deep_clean_one_time)
        ))),
        DeepCleanOption::Quarterly => doc.push(para(format!(
            "Quarterly deep clean: {} ({} per month)",
            format_money(totals.deep_clean_quarterly),
            format_money(totals.deep_clean_monthly_equivalent),
        ))),
    }

    doc.push(para(format!(
        "Monthly subtotal: {}",
        format_money(totals.monthly_subtotal)
    )));
    // Negative percentages are clamped for tax computation, so the printed
    // rate must match the rate that was actually applied.
    doc.push(para(format!(
        "Sales tax ({}%): {}",
        pricing.sales_tax_percent.max(Decimal::ZERO),
        format_money(totals.monthly_tax)
    )));
    doc.push(para(format!(
        "Monthly total: {}",
        format_money(totals.monthly_total_with_tax)
    )));

    let compensation_line = match pricing.compensation_mode {
        CompensationMode::Auto => format!(
            "Monthly compensation: {}",
            format_money(totals.compensation_monthly)
        ),
        CompensationMode::Override => format!(
            "Monthly compensation (agreed): {}",
            format_money(totals.compensation_monthly)
        ),
    };
    doc.push(para(compensation_line));
    doc.push(para(format!("Payment terms: Net {net_terms}.")));
}
