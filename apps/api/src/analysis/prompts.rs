// LLM prompt constants for RFP/PWS analysis.

/// System prompt — enforces JSON-only output.
pub const RFP_ANALYSIS_SYSTEM: &str =
    "You are assisting a janitorial contractor responding to an RFP or PWS. \
    Extract the solicitation's requirements and draft proposal content. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Analysis prompt template. Replace `{rfp_text}` before sending.
pub const RFP_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following RFP/PWS text and draft proposal content for a janitorial contractor.

Return a JSON object with this EXACT schema (no extra fields):
{
  "cleaning_plan_draft": "A cleaning plan describing staffing, products, and approach.",
  "scope_of_work_draft": "A scope of work summarizing the required services.",
  "schedule_rows": [
    {"task": "Empty trash & replace liners", "daily": true, "weekly": false, "monthly": false}
  ],
  "clarifying_questions": [
    "Question to ask the issuing agency before bidding."
  ]
}

Rules:
- cleaning_plan_draft and scope_of_work_draft are plain prose, no markdown.
- schedule_rows must cover every recurring task the solicitation requires;
  mark each task's frequency columns (a task may appear in more than one).
- clarifying_questions lists genuine ambiguities in the solicitation; an
  empty array is acceptable.

RFP/PWS TEXT:
{rfp_text}"#;
