//! Commands backed by the analysis gateway: plan generation, engagement gap
//! analysis and performance evaluation.

use super::search::print_requirements;
use crate::context::Context;
use crate::output::{print_json, print_list};
use comms_core::coordinator::{EngagementCoordinator, PerformanceCoordinator, PlanCoordinator};

// ---------------------------------------------------------------------------
// plan
// ---------------------------------------------------------------------------

pub fn plan(ctx: &Context, generate: bool, markdown: bool, json: bool) -> anyhow::Result<()> {
    let config = ctx.config()?;
    let mut model = ctx.model(&config)?;
    let mut coordinator = PlanCoordinator::new();

    if generate {
        let gateway = ctx.gateway(&config)?;
        let stakeholders = model.stakeholders().to_vec();
        let rt = tokio::runtime::Runtime::new()?;
        let n = rt.block_on(coordinator.generate(&gateway, &stakeholders, |rows| {
            model.replace_requirements(rows)
        }))?;
        eprintln!("Generated {n} requirement(s) for {} stakeholder(s)", stakeholders.len());
    }

    if markdown {
        print!(
            "{}",
            coordinator.export_markdown(model.settings(), model.requirements())
        );
        return Ok(());
    }
    if json {
        return print_json(&model.requirements());
    }
    print_requirements(model.requirements());
    Ok(())
}

// ---------------------------------------------------------------------------
// analyze
// ---------------------------------------------------------------------------

pub fn gaps(ctx: &Context, json: bool) -> anyhow::Result<()> {
    let config = ctx.config()?;
    let model = ctx.model(&config)?;
    let gateway = ctx.gateway(&config)?;

    let mut coordinator = EngagementCoordinator::new();
    let rt = tokio::runtime::Runtime::new()?;
    let analysis = rt.block_on(coordinator.analyze(&gateway, model.stakeholders()))?;

    if json {
        return print_json(analysis);
    }
    println!("{}", analysis.analysis);
    println!();
    print_list("Recommended actions:", &analysis.actions);
    Ok(())
}

// ---------------------------------------------------------------------------
// evaluate
// ---------------------------------------------------------------------------

pub fn evaluate(ctx: &Context, json: bool) -> anyhow::Result<()> {
    let config = ctx.config()?;
    let model = ctx.model(&config)?;
    let gateway = ctx.gateway(&config)?;

    let mut coordinator = PerformanceCoordinator::new();
    let rt = tokio::runtime::Runtime::new()?;
    let report = rt.block_on(coordinator.evaluate(&gateway, model.issues()))?;

    if json {
        return print_json(report);
    }
    println!("Score: {}/100", report.score);
    println!();
    println!("{}", report.feedback);
    println!();
    print_list("Improvements:", &report.improvements);
    Ok(())
}
