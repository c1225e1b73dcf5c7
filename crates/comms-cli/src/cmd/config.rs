use crate::context::Context;
use crate::output::print_json;
use clap::Subcommand;
use comms_core::config::{Config, WarnLevel, CONFIG_FILE};
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show the effective configuration (defaults filled in)
    Show,

    /// Validate the config for common mistakes
    Validate,

    /// Write a default config file
    Init {
        /// Destination (default: ./commsmgr.yaml)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(ctx: &Context, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(ctx, json),
        ConfigSubcommand::Validate => validate(ctx, json),
        ConfigSubcommand::Init { path, force } => init(path, force),
    }
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(ctx: &Context, json: bool) -> anyhow::Result<()> {
    let config = ctx.config()?;
    if json {
        return print_json(&config);
    }

    let gateway = &config.gateway;
    println!("Model:        {}", gateway.model);
    println!("Endpoint:     {}", gateway.endpoint);
    println!("Timeout:      {}s", gateway.timeout_secs);
    println!("API key from: {}", gateway.api_key_env.join(", "));
    let key = match gateway.resolve_api_key() {
        Ok(_) => "found",
        Err(_) => "not set",
    };
    println!("API key:      {key}");

    let project = config.project_settings();
    println!("Project:      {} ({}, {})", project.name, project.phase, project.methodology);
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(ctx: &Context, json: bool) -> anyhow::Result<()> {
    let config = ctx.config()?;
    let warnings = config.validate();

    if json {
        let value = serde_json::json!({
            "warnings": warnings,
        });
        print_json(&value)?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    if warnings.iter().any(|w| w.level == WarnLevel::Error) {
        anyhow::bail!("config validation found errors");
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

fn init(path: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let path = path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    Config::default().save(&path)?;
    println!("Wrote {}", path.display());
    Ok(())
}
