pub mod dashboard;
pub mod engagement;
pub mod extraction;
pub mod performance;
pub mod plan;
pub mod settings;
pub mod stakeholders;

use serde::Deserialize;

/// `?q=` search box query shared by every list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}
