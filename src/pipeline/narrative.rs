use crate::models::{PatientVitals, ReportNarrative, RiskAssessment, VitalType};

const RECOMMENDATION: &str =
    "Maintain routine monitoring and consult healthcare provider if needed.";

/// Render the report body. Wording does not vary by risk tier.
pub fn synthesize_narrative(vitals: &PatientVitals, risk: &RiskAssessment) -> ReportNarrative {
    ReportNarrative {
        summary: summary_panel(vitals, risk),
        interpretation: interpretation(vitals, risk),
    }
}

fn summary_panel(vitals: &PatientVitals, risk: &RiskAssessment) -> String {
    format!(
        "Patient Name: {name}\n\
         Heart Rate: {hr} {hr_unit}\n\
         Blood Pressure: {sys}/{dia} {bp_unit}\n\
         Risk Level: {category}",
        name = vitals.name,
        hr = vitals.heart_rate,
        hr_unit = VitalType::HeartRate.unit(),
        sys = vitals.systolic,
        dia = vitals.diastolic,
        bp_unit = VitalType::BloodPressure.unit(),
        category = risk.category,
    )
}

fn interpretation(vitals: &PatientVitals, risk: &RiskAssessment) -> String {
    format!(
        "Clinical Interpretation:\n\
         \n\
         The patient's heart rate is {hr} {hr_unit}.\n\
         Blood pressure recorded at {sys}/{dia} {bp_unit}.\n\
         \n\
         Based on calculated indicators, overall health risk is {category}.\n\
         \n\
         Recommendation:\n\
         {RECOMMENDATION}",
        hr = vitals.heart_rate,
        hr_unit = VitalType::HeartRate.unit(),
        sys = vitals.systolic,
        dia = vitals.diastolic,
        bp_unit = VitalType::BloodPressure.unit(),
        category = risk.category,
    )
}
