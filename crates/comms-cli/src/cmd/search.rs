use crate::context::Context;
use crate::output::{print_json, print_table};
use clap::ValueEnum;
use comms_core::dashboard::DashboardSummary;
use comms_core::matrix::build_engagement_matrix;
use comms_core::query;
use comms_core::requirement::CommRequirement;
use comms_core::stakeholder::Stakeholder;
use comms_core::types::EngagementLevel;

#[derive(Clone, Copy, ValueEnum)]
pub enum Collection {
    Stakeholders,
    Requirements,
    Issues,
    Feedback,
}

// ---------------------------------------------------------------------------
// summary
// ---------------------------------------------------------------------------

pub fn summary(ctx: &Context, json: bool) -> anyhow::Result<()> {
    let config = ctx.config()?;
    let model = ctx.model(&config)?;
    let summary = DashboardSummary::compute(&model);

    if json {
        return print_json(&summary);
    }

    println!("Project:           {} ({})", summary.project, summary.phase);
    println!("Stakeholders:      {}", summary.stakeholders);
    println!("Engagement gaps:   {}", summary.engagement_gaps);
    println!("Requirements:      {}", summary.requirements);
    println!(
        "Open issues:       {} ({} high impact)",
        summary.open_issues, summary.open_high_impact_issues
    );
    let avg = summary
        .average_rating
        .map(|r| format!(", average rating {r:.1}"))
        .unwrap_or_default();
    println!("Feedback entries:  {}{avg}", summary.feedback_entries);
    Ok(())
}

// ---------------------------------------------------------------------------
// search
// ---------------------------------------------------------------------------

pub fn run(ctx: &Context, collection: Collection, q: &str, json: bool) -> anyhow::Result<()> {
    let config = ctx.config()?;
    let model = ctx.model(&config)?;

    match collection {
        Collection::Stakeholders => {
            let hits = query::search(model.stakeholders(), q);
            if json {
                return print_json(&hits);
            }
            print_stakeholders(&hits);
        }
        Collection::Requirements => {
            let hits = query::search(model.requirements(), q);
            if json {
                return print_json(&hits);
            }
            print_requirements(&hits);
        }
        Collection::Issues => {
            let hits = query::search(model.issues(), q);
            if json {
                return print_json(&hits);
            }
            let rows: Vec<Vec<String>> = hits
                .iter()
                .map(|i| {
                    vec![
                        i.id.clone(),
                        i.date.clone(),
                        i.stakeholder.clone(),
                        i.description.clone(),
                        i.impact.to_string(),
                        i.status.to_string(),
                    ]
                })
                .collect();
            print_table(
                &["ID", "DATE", "STAKEHOLDER", "DESCRIPTION", "IMPACT", "STATUS"],
                &rows,
            );
        }
        Collection::Feedback => {
            let hits = query::search(model.feedback().entries(), q);
            if json {
                return print_json(&hits);
            }
            let rows: Vec<Vec<String>> = hits
                .iter()
                .map(|f| {
                    vec![
                        f.id.clone(),
                        f.date.clone(),
                        f.stakeholder.clone(),
                        f.item.clone(),
                        f.rating.get().to_string(),
                        f.comment.clone(),
                    ]
                })
                .collect();
            print_table(
                &["ID", "DATE", "STAKEHOLDER", "ITEM", "RATING", "COMMENT"],
                &rows,
            );
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// matrix
// ---------------------------------------------------------------------------

pub fn matrix(ctx: &Context, q: &str, json: bool) -> anyhow::Result<()> {
    let config = ctx.config()?;
    let model = ctx.model(&config)?;
    let rows = build_engagement_matrix(model.stakeholders(), q);

    if json {
        return print_json(&rows);
    }

    let mut headers = vec!["STAKEHOLDER"];
    headers.extend(EngagementLevel::all().iter().map(|l| l.as_str()));
    let table: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            std::iter::once(row.name.clone())
                .chain(row.cells.iter().map(|c| c.marker().to_string()))
                .collect()
        })
        .collect();
    print_table(&headers, &table);
    println!();
    println!("C = current, D = desired");
    Ok(())
}

/// Shared by `search stakeholders` and `extract`.
pub fn print_stakeholders(stakeholders: &[Stakeholder]) {
    let rows: Vec<Vec<String>> = stakeholders
        .iter()
        .map(|s| {
            vec![
                s.id.clone(),
                s.name.clone(),
                s.role.clone(),
                s.current_engagement.to_string(),
                s.desired_engagement.to_string(),
                s.power.to_string(),
                s.interest.to_string(),
            ]
        })
        .collect();
    print_table(
        &["ID", "NAME", "ROLE", "CURRENT", "DESIRED", "POWER", "INTEREST"],
        &rows,
    );
}

pub fn print_requirements(requirements: &[CommRequirement]) {
    let rows: Vec<Vec<String>> = requirements
        .iter()
        .map(|r| {
            vec![
                r.id.clone(),
                r.stakeholder_name.clone(),
                r.info_needed.clone(),
                r.format.clone(),
                r.frequency.clone(),
                r.channel.clone(),
                r.owner.clone(),
            ]
        })
        .collect();
    print_table(
        &["ID", "STAKEHOLDER", "INFO", "FORMAT", "FREQUENCY", "CHANNEL", "OWNER"],
        &rows,
    );
}
