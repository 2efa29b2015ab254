//! Heuristic triage scoring over extracted vitals.
//!
//! The score is a sum of independent sub-scores. It is a triage signal, not a
//! clinical judgment.

use crate::models::{PatientVitals, RiskAssessment, RiskCategory};

/// Score weights and cut-offs.
pub mod thresholds {
    /// Heart rate below this is scored as bradycardic.
    pub const HEART_RATE_LOW: u32 = 60;

    /// Heart rate above this is scored as tachycardic.
    pub const HEART_RATE_HIGH: u32 = 100;

    pub const HEART_RATE_POINTS: u32 = 2;

    pub const STAGE2_SYSTOLIC: u32 = 140;
    pub const STAGE2_DIASTOLIC: u32 = 90;
    pub const STAGE2_POINTS: u32 = 4;

    pub const ELEVATED_SYSTOLIC: u32 = 120;
    pub const ELEVATED_DIASTOLIC: u32 = 80;
    pub const ELEVATED_POINTS: u32 = 2;

    /// Highest score still categorized LOW.
    pub const LOW_MAX: u32 = 2;

    /// Highest score still categorized MODERATE.
    pub const MODERATE_MAX: u32 = 6;
}

/// Score extracted vitals and derive the risk tier.
pub fn score_vitals(vitals: &PatientVitals) -> RiskAssessment {
    let score = heart_rate_points(vitals.heart_rate)
        + blood_pressure_points(vitals.systolic, vitals.diastolic);

    let assessment = RiskAssessment {
        score,
        category: category_for_score(score),
    };

    tracing::debug!(
        score = assessment.score,
        category = assessment.category.as_str(),
        "Risk scored"
    );

    assessment
}

/// A missing heart rate (0) lands below the low cut-off and scores like bradycardia.
pub fn heart_rate_points(heart_rate: u32) -> u32 {
    if heart_rate < thresholds::HEART_RATE_LOW || heart_rate > thresholds::HEART_RATE_HIGH {
        thresholds::HEART_RATE_POINTS
    } else {
        0
    }
}

/// Only the highest matching tier counts.
pub fn blood_pressure_points(systolic: u32, diastolic: u32) -> u32 {
    if systolic >= thresholds::STAGE2_SYSTOLIC || diastolic >= thresholds::STAGE2_DIASTOLIC {
        thresholds::STAGE2_POINTS
    } else if systolic >= thresholds::ELEVATED_SYSTOLIC
        || diastolic >= thresholds::ELEVATED_DIASTOLIC
    {
        thresholds::ELEVATED_POINTS
    } else {
        0
    }
}

// TODO: HIGH needs a score of 7 but the weights above top out at 6; revisit the
// weights or the cut-off together with whoever owns the triage policy.
pub fn category_for_score(score: u32) -> RiskCategory {
    if score <= thresholds::LOW_MAX {
        RiskCategory::Low
    } else if score <= thresholds::MODERATE_MAX {
        RiskCategory::Moderate
    } else {
        RiskCategory::High
    }
}
