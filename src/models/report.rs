use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::RiskCategory;
use super::vital_sign::PatientVitals;

/// Timestamp layout used on stored report records.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Heuristic triage score and its tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: u32,
    pub category: RiskCategory,
}

/// Plain-text report body: a summary panel followed by an interpretation block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportNarrative {
    pub summary: String,
    pub interpretation: String,
}

impl ReportNarrative {
    /// Both blocks, summary first, separated by a blank line.
    pub fn full_text(&self) -> String {
        format!("{}\n\n{}", self.summary, self.interpretation)
    }
}

/// Record handed to whatever persists reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRecord {
    pub id: Uuid,
    pub name: String,
    pub risk: RiskCategory,
    pub risk_score: u32,
    pub summary: String,
    pub interpretation: String,
    pub created_at: String,
}

impl ReportRecord {
    pub fn new(vitals: &PatientVitals, risk: &RiskAssessment, narrative: &ReportNarrative) -> Self {
        Self::at(vitals, risk, narrative, Local::now().naive_local())
    }

    pub fn at(
        vitals: &PatientVitals,
        risk: &RiskAssessment,
        narrative: &ReportNarrative,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: vitals.name.clone(),
            risk: risk.category,
            risk_score: risk.score,
            summary: narrative.summary.clone(),
            interpretation: narrative.interpretation.clone(),
            created_at: created_at.format(CREATED_AT_FORMAT).to_string(),
        }
    }
}
