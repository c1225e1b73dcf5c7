pub mod config;
pub mod coordinator;
pub mod dashboard;
pub mod error;
pub mod feedback;
pub mod gateway;
pub mod ids;
pub mod import;
pub mod io;
pub mod issue;
pub mod matrix;
pub mod model;
pub mod query;
pub mod request;
pub mod requirement;
pub mod settings;
pub mod stakeholder;
pub mod types;

pub use error::{CommsError, Result};
