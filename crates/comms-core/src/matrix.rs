//! Stakeholder engagement assessment matrix (SEAM).
//!
//! One row per stakeholder, one cell per engagement level in fixed order.
//! A cell is marked `current` and/or `desired`; when the two levels
//! coincide a single cell carries both markers. No aggregation or gap
//! scoring happens here.

use crate::query;
use crate::stakeholder::Stakeholder;
use crate::types::{EngagementLevel, Influence};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatrixCell {
    pub level: EngagementLevel,
    pub current: bool,
    pub desired: bool,
}

impl MatrixCell {
    pub fn is_marked(&self) -> bool {
        self.current || self.desired
    }

    /// Compact marker used by the text renderer: `C`, `D`, `CD` or empty.
    pub fn marker(&self) -> &'static str {
        match (self.current, self.desired) {
            (true, true) => "CD",
            (true, false) => "C",
            (false, true) => "D",
            (false, false) => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixRow {
    pub stakeholder_id: String,
    pub name: String,
    pub power: Influence,
    pub interest: Influence,
    pub cells: [MatrixCell; 5],
}

impl MatrixRow {
    pub fn marked_cells(&self) -> impl Iterator<Item = &MatrixCell> {
        self.cells.iter().filter(|c| c.is_marked())
    }
}

/// Project one stakeholder onto the five engagement columns.
pub fn build_engagement_matrix_row(stakeholder: &Stakeholder) -> MatrixRow {
    let cells = EngagementLevel::all().map(|level| MatrixCell {
        level,
        current: stakeholder.current_engagement == level,
        desired: stakeholder.desired_engagement == level,
    });
    MatrixRow {
        stakeholder_id: stakeholder.id.clone(),
        name: stakeholder.name.clone(),
        power: stakeholder.power,
        interest: stakeholder.interest,
        cells,
    }
}

/// Search `stakeholders` and project every match to a matrix row.
pub fn build_engagement_matrix(stakeholders: &[Stakeholder], query: &str) -> Vec<MatrixRow> {
    query::search(stakeholders, query)
        .iter()
        .map(build_engagement_matrix_row)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stakeholder(current: EngagementLevel, desired: EngagementLevel) -> Stakeholder {
        Stakeholder {
            id: "1".into(),
            name: "Sarah Miller".into(),
            role: "Eng. Lead".into(),
            current_engagement: current,
            desired_engagement: desired,
            power: Influence::Low,
            interest: Influence::High,
        }
    }

    #[test]
    fn marks_current_and_desired_cells() {
        let row = build_engagement_matrix_row(&stakeholder(
            EngagementLevel::Resistant,
            EngagementLevel::Supportive,
        ));
        assert_eq!(row.marked_cells().count(), 2);
        assert!(row.cells[EngagementLevel::Resistant.index()].current);
        assert!(!row.cells[EngagementLevel::Resistant.index()].desired);
        assert!(row.cells[EngagementLevel::Supportive.index()].desired);
        assert_eq!(row.cells[EngagementLevel::Supportive.index()].marker(), "D");
    }

    #[test]
    fn equal_levels_share_one_cell() {
        let row = build_engagement_matrix_row(&stakeholder(
            EngagementLevel::Leading,
            EngagementLevel::Leading,
        ));
        let marked: Vec<_> = row.marked_cells().collect();
        assert_eq!(marked.len(), 1);
        assert!(marked[0].current && marked[0].desired);
        assert_eq!(marked[0].marker(), "CD");
    }

    #[test]
    fn every_combination_marks_one_or_two_cells() {
        for &current in EngagementLevel::all() {
            for &desired in EngagementLevel::all() {
                let row = build_engagement_matrix_row(&stakeholder(current, desired));
                let currents = row.cells.iter().filter(|c| c.current).count();
                let desireds = row.cells.iter().filter(|c| c.desired).count();
                assert_eq!(currents, 1);
                assert_eq!(desireds, 1);
                let marked = row.marked_cells().count();
                assert_eq!(marked, if current == desired { 1 } else { 2 });
            }
        }
    }

    #[test]
    fn columns_follow_engagement_order() {
        let row = build_engagement_matrix_row(&stakeholder(
            EngagementLevel::Unaware,
            EngagementLevel::Neutral,
        ));
        let levels: Vec<_> = row.cells.iter().map(|c| c.level).collect();
        assert_eq!(levels, EngagementLevel::all().to_vec());
    }

    #[test]
    fn matrix_applies_search() {
        let mut other = stakeholder(EngagementLevel::Neutral, EngagementLevel::Neutral);
        other.id = "2".into();
        other.name = "Mark Davis".into();
        other.role = "Product Owner".into();
        let all = vec![
            stakeholder(EngagementLevel::Resistant, EngagementLevel::Supportive),
            other,
        ];
        assert_eq!(build_engagement_matrix(&all, "").len(), 2);
        let rows = build_engagement_matrix(&all, "owner");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].stakeholder_id, "2");
    }
}
