use serde::{Deserialize, Serialize};

/// Name used when no patient name could be recovered from the document.
pub const UNKNOWN_PATIENT: &str = "Unknown";

/// Vital signs recovered from one document's OCR text.
///
/// A zero value means "not found". Fields are independent: any subset may be
/// present, and each present value passed its plausibility bounds at
/// extraction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientVitals {
    pub name: String,
    /// Beats per minute.
    pub heart_rate: u32,
    /// mmHg.
    pub systolic: u32,
    /// mmHg.
    pub diastolic: u32,
}

impl Default for PatientVitals {
    fn default() -> Self {
        Self {
            name: UNKNOWN_PATIENT.to_string(),
            heart_rate: 0,
            systolic: 0,
            diastolic: 0,
        }
    }
}

impl PatientVitals {
    pub fn has_name(&self) -> bool {
        self.name != UNKNOWN_PATIENT
    }

    pub fn has_heart_rate(&self) -> bool {
        self.heart_rate != 0
    }

    pub fn has_blood_pressure(&self) -> bool {
        self.systolic != 0 && self.diastolic != 0
    }

    /// True when nothing reliable was extracted.
    pub fn is_empty(&self) -> bool {
        !self.has_name() && !self.has_heart_rate() && !self.has_blood_pressure()
    }
}
