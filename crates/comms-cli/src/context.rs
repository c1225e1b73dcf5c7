use anyhow::Context as _;
use comms_core::config::Config;
use comms_core::model::{AppModel, Snapshot};
use gemini_gateway::GeminiGateway;
use std::path::PathBuf;

/// Global flags resolved into the things commands need.
pub struct Context {
    pub config_path: Option<PathBuf>,
    pub data_path: Option<PathBuf>,
}

impl Context {
    pub fn new(config_path: Option<PathBuf>, data_path: Option<PathBuf>) -> Self {
        Self {
            config_path,
            data_path,
        }
    }

    pub fn config(&self) -> anyhow::Result<Config> {
        Config::discover(self.config_path.as_deref()).context("failed to load config")
    }

    /// The demo data set, or `--data` when given. A `project` section in the
    /// config overrides the data set's settings.
    pub fn model(&self, config: &Config) -> anyhow::Result<AppModel> {
        let model = match &self.data_path {
            Some(path) => Snapshot::load(path)
                .with_context(|| format!("failed to load data from {}", path.display()))?
                .into_model(),
            None => AppModel::seeded(),
        };
        Ok(match &config.project {
            Some(project) => model.with_settings(project.clone()),
            None => model,
        })
    }

    /// The raw data set, for commands that write a modified copy.
    pub fn snapshot(&self) -> anyhow::Result<Snapshot> {
        match &self.data_path {
            Some(path) => Snapshot::load(path)
                .with_context(|| format!("failed to load data from {}", path.display())),
            None => Ok(Snapshot::demo()),
        }
    }

    pub fn gateway(&self, config: &Config) -> anyhow::Result<GeminiGateway> {
        Ok(GeminiGateway::from_config(&config.gateway)?)
    }
}
