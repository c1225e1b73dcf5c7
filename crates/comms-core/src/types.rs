use crate::error::CommsError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// EngagementLevel
// ---------------------------------------------------------------------------

/// Stakeholder disposition toward the project.
///
/// The declaration order is the engagement order:
/// `Unaware < Resistant < Neutral < Supportive < Leading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EngagementLevel {
    Unaware,
    Resistant,
    Neutral,
    Supportive,
    Leading,
}

impl EngagementLevel {
    pub fn all() -> &'static [EngagementLevel; 5] {
        &[
            EngagementLevel::Unaware,
            EngagementLevel::Resistant,
            EngagementLevel::Neutral,
            EngagementLevel::Supportive,
            EngagementLevel::Leading,
        ]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EngagementLevel::Unaware => "Unaware",
            EngagementLevel::Resistant => "Resistant",
            EngagementLevel::Neutral => "Neutral",
            EngagementLevel::Supportive => "Supportive",
            EngagementLevel::Leading => "Leading",
        }
    }
}

impl fmt::Display for EngagementLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EngagementLevel {
    type Err = CommsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EngagementLevel::all()
            .iter()
            .copied()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CommsError::InvalidEngagement(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Influence (power / interest)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Influence {
    High,
    Low,
}

impl Influence {
    pub fn as_str(self) -> &'static str {
        match self {
            Influence::High => "High",
            Influence::Low => "Low",
        }
    }
}

impl fmt::Display for Influence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Influence {
    type Err = CommsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Influence::High),
            "low" => Ok(Influence::Low),
            _ => Err(CommsError::InvalidValue {
                kind: "power/interest",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Impact
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Impact {
    Low,
    Medium,
    High,
}

impl Impact {
    pub fn as_str(self) -> &'static str {
        match self {
            Impact::Low => "Low",
            Impact::Medium => "Medium",
            Impact::High => "High",
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// IssueStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueStatus {
    Open,
    Resolved,
    Monitor,
}

impl IssueStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueStatus::Open => "Open",
            IssueStatus::Resolved => "Resolved",
            IssueStatus::Monitor => "Monitor",
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ProjectPhase
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProjectPhase {
    Initiation,
    Planning,
    Execution,
    #[serde(rename = "Monitoring & Control")]
    MonitoringAndControl,
    Closure,
}

impl ProjectPhase {
    pub fn all() -> &'static [ProjectPhase] {
        &[
            ProjectPhase::Initiation,
            ProjectPhase::Planning,
            ProjectPhase::Execution,
            ProjectPhase::MonitoringAndControl,
            ProjectPhase::Closure,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectPhase::Initiation => "Initiation",
            ProjectPhase::Planning => "Planning",
            ProjectPhase::Execution => "Execution",
            ProjectPhase::MonitoringAndControl => "Monitoring & Control",
            ProjectPhase::Closure => "Closure",
        }
    }
}

impl fmt::Display for ProjectPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProjectPhase {
    type Err = CommsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ProjectPhase::all()
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(wanted))
            .or_else(|| {
                // CLI-friendly spellings: "monitoring", "monitoring-and-control"
                let lower = wanted.to_ascii_lowercase();
                lower
                    .starts_with("monitoring")
                    .then_some(ProjectPhase::MonitoringAndControl)
            })
            .ok_or_else(|| CommsError::InvalidValue {
                kind: "phase",
                value: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Methodology
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Methodology {
    #[serde(rename = "Predictive (Waterfall)")]
    Predictive,
    #[serde(rename = "Agile (Scrum)")]
    Agile,
    Hybrid,
}

impl Methodology {
    pub fn as_str(self) -> &'static str {
        match self {
            Methodology::Predictive => "Predictive (Waterfall)",
            Methodology::Agile => "Agile (Scrum)",
            Methodology::Hybrid => "Hybrid",
        }
    }
}

impl fmt::Display for Methodology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Methodology {
    type Err = CommsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        if lower.starts_with("predictive") || lower == "waterfall" {
            Ok(Methodology::Predictive)
        } else if lower.starts_with("agile") || lower == "scrum" {
            Ok(Methodology::Agile)
        } else if lower == "hybrid" {
            Ok(Methodology::Hybrid)
        } else {
            Err(CommsError::InvalidValue {
                kind: "methodology",
                value: s.to_string(),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
