//! Prompt templates, one per gateway operation.
//!
//! Structured inputs are embedded as compact JSON so the model sees the same
//! field names the response schemas use.

use comms_core::issue::CommIssue;
use comms_core::stakeholder::{PlanSubject, Stakeholder};
use comms_core::Result;

pub fn extract_stakeholders(text: &str) -> String {
    format!(
        r#"Read the project text below (charter, meeting notes or similar) and list every stakeholder it mentions.

For each stakeholder:
1. Give their name and role.
2. Judge their power (High or Low) and interest (High or Low) from their title and involvement.
3. Judge their current engagement level (Unaware, Resistant, Neutral, Supportive or Leading) from the context.
4. Choose the desired engagement level the project should aim for.

TEXT:
"{text}"

Answer with a JSON array."#
    )
}

pub fn generate_comm_plan(subjects: &[PlanSubject]) -> Result<String> {
    let subjects = serde_json::to_string(subjects)?;
    Ok(format!(
        r#"Acting as a PMP-certified project manager, recommend how to communicate with each stakeholder below: the information they need, the format, the frequency and the channel.

Stakeholders: {subjects}

Keep each recommendation specific and professional, fit for a Communications Management Plan (PMBOK 5.3)."#
    ))
}

pub fn analyze_engagement_gaps(stakeholders: &[Stakeholder]) -> Result<String> {
    let stakeholders = serde_json::to_string(stakeholders)?;
    Ok(format!(
        r#"Carry out a Stakeholder Engagement Assessment (PMBOK 5.6).
Compare the current and desired engagement levels of these stakeholders:
{stakeholders}

1. Summarise the overall health of stakeholder engagement.
2. List concrete corrective actions that would close the gaps."#
    ))
}

pub fn evaluate_performance(issues: &[CommIssue]) -> Result<String> {
    let issues = serde_json::to_string(issues)?;
    Ok(format!(
        r#"Evaluate the project's communication performance (PMBOK 5.7) from this issue log:
{issues}

Give a performance score between 0 and 100, qualitative feedback, and suggested process improvements."#
    ))
}
