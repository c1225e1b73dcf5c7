use comms_core::config::Config;
use comms_core::coordinator::{
    EngagementCoordinator, ExtractionCoordinator, PerformanceCoordinator, PlanCoordinator,
    SettingsCoordinator,
};
use comms_core::gateway::AnalysisGateway;
use comms_core::model::AppModel;
use comms_core::{CommsError, Result};
use gemini_gateway::GeminiGateway;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::warn;

/// Shared application state passed to all route handlers.
///
/// Lock order is coordinator first, then model. Neither lock is held across
/// a gateway await: handlers lock the coordinator to begin a request and
/// release it; a spawned task makes the call and locks again to finish.
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<RwLock<AppModel>>,
    pub extraction: Arc<Mutex<ExtractionCoordinator>>,
    pub plan: Arc<Mutex<PlanCoordinator>>,
    pub engagement: Arc<Mutex<EngagementCoordinator>>,
    pub performance: Arc<Mutex<PerformanceCoordinator>>,
    pub settings: Arc<Mutex<SettingsCoordinator>>,
    gateway: GatewayHandle,
}

#[derive(Clone)]
enum GatewayHandle {
    Ready(Arc<dyn AnalysisGateway>),
    /// No API key was found; holds the variables that were consulted.
    Unconfigured(String),
}

impl AppState {
    pub fn new(model: AppModel, gateway: Arc<dyn AnalysisGateway>) -> Self {
        Self::with_handle(model, GatewayHandle::Ready(gateway))
    }

    /// State whose AI routes all answer with a missing-credentials error.
    pub fn without_gateway(model: AppModel, key_vars: impl Into<String>) -> Self {
        Self::with_handle(model, GatewayHandle::Unconfigured(key_vars.into()))
    }

    /// Build the Gemini gateway from config. A missing API key keeps the
    /// server usable offline; any other gateway error is returned.
    pub fn from_config(config: &Config, model: AppModel) -> Result<Self> {
        match GeminiGateway::from_config(&config.gateway) {
            Ok(gw) => Ok(Self::new(model, Arc::new(gw))),
            Err(CommsError::MissingCredentials(vars)) => {
                warn!("no API key in {vars}; AI-assisted features are disabled");
                Ok(Self::without_gateway(model, vars))
            }
            Err(e) => Err(e),
        }
    }

    fn with_handle(model: AppModel, gateway: GatewayHandle) -> Self {
        let settings = SettingsCoordinator::new(model.settings());
        Self {
            model: Arc::new(RwLock::new(model)),
            extraction: Arc::new(Mutex::new(ExtractionCoordinator::new())),
            plan: Arc::new(Mutex::new(PlanCoordinator::new())),
            engagement: Arc::new(Mutex::new(EngagementCoordinator::new())),
            performance: Arc::new(Mutex::new(PerformanceCoordinator::new())),
            settings: Arc::new(Mutex::new(settings)),
            gateway,
        }
    }

    /// The gateway, or the configuration error to report without calling it.
    pub fn gateway(&self) -> Result<Arc<dyn AnalysisGateway>> {
        match &self.gateway {
            GatewayHandle::Ready(gw) => Ok(Arc::clone(gw)),
            GatewayHandle::Unconfigured(vars) => Err(CommsError::MissingCredentials(vars.clone())),
        }
    }
}
