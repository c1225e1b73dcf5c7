//! Stakeholder feedback log: append-only, most recent first.
//!
//! New entries are always prepended, so the visible ordering puts every new
//! entry ahead of all earlier ones. Entries are never edited or removed.

use crate::error::{CommsError, Result};
use crate::ids::{self, IdGenerator};
use crate::query::{SearchField, Searchable};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Rating used when the form leaves it unset; the form opens at five stars.
pub const DEFAULT_RATING: u8 = 5;

// ---------------------------------------------------------------------------
// Rating
// ---------------------------------------------------------------------------

/// A satisfaction rating in the closed range `[1, 5]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Result<Self> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(CommsError::InvalidRating(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// For literals known at compile time; out-of-range input saturates.
    pub(crate) const fn saturating(value: u8) -> Self {
        if value < Self::MIN {
            Self(Self::MIN)
        } else if value > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(value)
        }
    }
}

impl TryFrom<i64> for Rating {
    type Error = CommsError;

    fn try_from(value: i64) -> Result<Self> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(r: Rating) -> u8 {
        r.0
    }
}

// ---------------------------------------------------------------------------
// CommFeedback
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommFeedback {
    pub id: String,
    pub date: String,
    pub stakeholder: String,
    pub item: String,
    pub rating: Rating,
    pub comment: String,
}

impl Searchable for CommFeedback {
    const SEARCH_FIELDS: &'static [SearchField<Self>] = &[
        SearchField {
            name: "stakeholder",
            get: |f| f.stakeholder.as_str(),
        },
        SearchField {
            name: "item",
            get: |f| f.item.as_str(),
        },
        SearchField {
            name: "comment",
            get: |f| f.comment.as_str(),
        },
    ];
}

// ---------------------------------------------------------------------------
// NewFeedback: form input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewFeedback {
    pub stakeholder: String,
    pub item: String,
    pub comment: String,
    #[serde(default)]
    pub rating: Option<i64>,
}

impl NewFeedback {
    /// Check required fields and the rating range, returning the rating to
    /// record.
    pub fn validate(&self) -> Result<Rating> {
        if self.stakeholder.trim().is_empty() {
            return Err(CommsError::EmptyField("stakeholder"));
        }
        if self.item.trim().is_empty() {
            return Err(CommsError::EmptyField("item"));
        }
        if self.comment.trim().is_empty() {
            return Err(CommsError::EmptyField("comment"));
        }
        Rating::new(self.rating.unwrap_or(i64::from(DEFAULT_RATING)))
    }
}

// ---------------------------------------------------------------------------
// FeedbackLog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedbackLog(Vec<CommFeedback>);

impl FeedbackLog {
    /// Build a log from entries already in most-recent-first order.
    pub fn from_entries(entries: Vec<CommFeedback>) -> Self {
        Self(entries)
    }

    /// Validate `new`, stamp it with a fresh id and today's date, and put it
    /// at the front of the log.
    pub fn record(&mut self, new: NewFeedback) -> Result<CommFeedback> {
        let rating = new.validate()?;
        let entry = CommFeedback {
            id: IdGenerator::next(ids::FEEDBACK),
            date: Utc::now().format("%Y-%m-%d").to_string(),
            stakeholder: new.stakeholder,
            item: new.item,
            rating,
            comment: new.comment,
        };
        self.0.insert(0, entry.clone());
        Ok(entry)
    }

    pub fn entries(&self) -> &[CommFeedback] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Mean rating rounded to one decimal, `None` for an empty log.
    pub fn average_rating(&self) -> Option<f64> {
        if self.0.is_empty() {
            return None;
        }
        let sum: u32 = self.0.iter().map(|f| u32::from(f.rating.get())).sum();
        let mean = f64::from(sum) / self.0.len() as f64;
        Some((mean * 10.0).round() / 10.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
