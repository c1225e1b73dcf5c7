//! `gemini-gateway`: the remote analysis capability behind
//! [`comms_core::gateway::AnalysisGateway`].
//!
//! Each operation sends one `generateContent` request carrying a prompt and
//! a `responseSchema`, then deserializes the first candidate's text into the
//! operation's result type.
//!
//! ```text
//! AnalysisGateway call
//!     │
//!     ▼
//! prompt::*      ← template + JSON-encoded input
//! schema::*      ← declared result shape
//!     │
//!     ▼
//! GeminiGateway  ← POST {endpoint}/v1beta/models/{model}:generateContent
//!     │
//!     ▼
//! strict serde   ← anything off-shape is MalformedResponse
//! ```
//!
//! Credentials are resolved when the gateway is built, so a missing key is
//! reported before any request is attempted.

mod client;
pub mod prompt;
pub mod schema;

pub use client::GeminiGateway;
