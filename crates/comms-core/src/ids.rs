//! Record id generation.
//!
//! Ids look like `extracted-1718000000000-3`: a prefix naming the producer,
//! the wall-clock millisecond, and a process-wide sequence number. The
//! sequence makes ids unique within a process run even when two batches are
//! minted in the same millisecond. They are not meant to be unguessable.

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

pub const EXTRACTED: &str = "extracted";
pub const AUTO: &str = "auto";
pub const MANUAL: &str = "manual";
pub const FEEDBACK: &str = "fb";

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

pub struct IdGenerator;

impl IdGenerator {
    /// Mint a single id.
    pub fn next(prefix: &str) -> String {
        let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        format!("{prefix}-{}-{seq}", Utc::now().timestamp_millis())
    }

    /// Mint `n` ids sharing one timestamp, in sequence order.
    pub fn batch(prefix: &str, n: usize) -> Vec<String> {
        let millis = Utc::now().timestamp_millis();
        let start = SEQUENCE.fetch_add(n as u64, Ordering::Relaxed);
        (0..n as u64)
            .map(|i| format!("{prefix}-{millis}-{}", start + i))
            .collect()
    }
}
