mod cmd;
mod context;
mod output;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, search::Collection};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "commsmgr",
    about = "Stakeholder communications manager: engagement matrix, communication plans and AI-assisted analysis",
    version,
    propagate_version = true
)]
struct Cli {
    /// Config file (default: ./commsmgr.yaml when present)
    #[arg(long, global = true, env = "COMMSMGR_CONFIG")]
    config: Option<PathBuf>,

    /// Load stakeholders, plan and logs from a YAML/JSON file instead of the demo data
    #[arg(long, global = true, env = "COMMSMGR_DATA")]
    data: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        /// Port to listen on (0 = OS-assigned)
        #[arg(long, default_value = "3141", env = "COMMSMGR_PORT")]
        port: u16,

        /// Don't open browser automatically
        #[arg(long)]
        no_open: bool,
    },

    /// Dashboard headline counts
    Summary,

    /// Search a collection with the same rules as the UI search box
    Search {
        #[arg(value_enum)]
        collection: Collection,

        /// Case-insensitive substring; omit to list everything
        query: Option<String>,
    },

    /// Stakeholder engagement assessment matrix
    Matrix {
        /// Filter stakeholders by name or role
        query: Option<String>,
    },

    /// Extract stakeholders from project notes via the analysis gateway
    Extract {
        /// Files to import (.txt, .md, .csv, .json, .docx)
        files: Vec<PathBuf>,

        /// Literal notes text, placed before any imported files
        #[arg(long)]
        text: Option<String>,

        /// Write the data set with the extracted stakeholders replacing the old ones
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show the communications plan, or generate a new one
    Plan {
        /// Replace the plan with AI-recommended requirements
        #[arg(long)]
        generate: bool,

        /// Print the plan as a Markdown document
        #[arg(long)]
        markdown: bool,
    },

    /// Assess gaps between current and desired engagement (PMBOK 5.6)
    Analyze,

    /// Score communication performance from the issue log (PMBOK 5.7)
    Evaluate,

    /// Inspect and validate configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let ctx = context::Context::new(cli.config, cli.data);

    let result = match cli.command {
        Commands::Serve { port, no_open } => cmd::serve::run(&ctx, port, no_open),
        Commands::Summary => cmd::search::summary(&ctx, cli.json),
        Commands::Search { collection, query } => {
            cmd::search::run(&ctx, collection, query.as_deref().unwrap_or(""), cli.json)
        }
        Commands::Matrix { query } => {
            cmd::search::matrix(&ctx, query.as_deref().unwrap_or(""), cli.json)
        }
        Commands::Extract {
            files,
            text,
            output,
        } => cmd::extract::run(&ctx, &files, text, output.as_deref(), cli.json),
        Commands::Plan { generate, markdown } => cmd::analyze::plan(&ctx, generate, markdown, cli.json),
        Commands::Analyze => cmd::analyze::gaps(&ctx, cli.json),
        Commands::Evaluate => cmd::analyze::evaluate(&ctx, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&ctx, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
