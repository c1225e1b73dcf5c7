pub mod analyze;
pub mod config;
pub mod extract;
pub mod search;
pub mod serve;
