use crate::context::Context;
use super::search::print_stakeholders;
use crate::output::print_json;
use anyhow::Context as _;
use comms_core::coordinator::ExtractionCoordinator;
use std::path::{Path, PathBuf};

pub fn run(
    ctx: &Context,
    files: &[PathBuf],
    text: Option<String>,
    output: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let config = ctx.config()?;
    let mut coordinator = ExtractionCoordinator::new();
    if let Some(text) = text {
        coordinator.set_input(text);
    }

    for path in files {
        let bytes =
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let chars = coordinator.import_file(&name, &bytes)?;
        if chars == 0 {
            eprintln!("{name}: no text found, skipped");
        }
    }

    let gateway = ctx.gateway(&config)?;
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(coordinator.extract(&gateway))?;

    if let Some(dest) = output {
        let mut snapshot = ctx.snapshot()?;
        let n = coordinator.save(|stakeholders| snapshot.stakeholders = stakeholders)?;
        if let Some(project) = &config.project {
            snapshot.settings = Some(project.clone());
        }
        snapshot
            .save(dest)
            .with_context(|| format!("failed to write {}", dest.display()))?;
        eprintln!("Saved {n} stakeholder(s) to {}", dest.display());
    }

    let drafts = coordinator.drafts();
    if json {
        return print_json(&drafts);
    }

    print_stakeholders(drafts);
    Ok(())
}
