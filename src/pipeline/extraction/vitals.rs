//! Pattern-based vital sign extraction from normalized OCR text.
//!
//! Every field is optional. A pattern that does not match, or a value outside its
//! plausibility bounds, leaves the field at its default instead of failing.
//! OCR output is full of stray digit pairs (page numbers, dates, reference
//! ranges), so the bounds below are the only thing standing between those and
//! the report.

use std::ops::RangeInclusive;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::PatientVitals;

/// "PREPARED FOR Firstname Lastname" on report cover pages.
static PREPARED_FOR_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"PREPARED FOR\s+([A-Z][a-z]+\s[A-Z][a-z]+)").unwrap());

/// "Firstname Lastname 4/17/1962": a name printed next to a date of birth.
static NAME_BEFORE_DOB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z][a-z]+\s[A-Z][a-z]+)\s+[0-9]{1,2}/[0-9]{1,2}/[0-9]{4}").unwrap()
});

static HEART_RATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([0-9]{2,3})\s*bpm").unwrap());

static BLOOD_PRESSURE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]{2,3})/([0-9]{2,3})").unwrap());

/// Plausibility bounds for extracted values.
pub mod bounds {
    use std::ops::RangeInclusive;

    /// Exclusive on both ends: 30 < bpm < 200.
    pub const HEART_RATE: RangeInclusive<u32> = 31..=199;

    pub const SYSTOLIC: RangeInclusive<u32> = 70..=200;

    pub const DIASTOLIC: RangeInclusive<u32> = 40..=130;
}

/// Extract patient name, heart rate, and blood pressure from normalized text.
pub fn extract_vitals(text: &str) -> PatientVitals {
    let mut vitals = PatientVitals::default();

    if let Some(name) = extract_name(text) {
        vitals.name = name;
    }

    if let Some(hr) = extract_heart_rate(text) {
        vitals.heart_rate = hr;
    }

    if let Some((sys, dia)) = extract_blood_pressure(text) {
        vitals.systolic = sys;
        vitals.diastolic = dia;
    }

    tracing::debug!(
        name_found = vitals.has_name(),
        heart_rate = vitals.heart_rate,
        systolic = vitals.systolic,
        diastolic = vitals.diastolic,
        "Vitals extracted"
    );

    vitals
}

/// Cover-page name first, then a name sitting in front of a date of birth.
pub fn extract_name(text: &str) -> Option<String> {
    PREPARED_FOR_NAME
        .captures(text)
        .or_else(|| NAME_BEFORE_DOB.captures(text))
        .map(|caps| caps[1].to_string())
}

/// Only the first "<digits> bpm" occurrence is considered. If it is out of
/// bounds the heart rate is reported as missing.
pub fn extract_heart_rate(text: &str) -> Option<u32> {
    let caps = HEART_RATE.captures(text)?;
    parse_within(&caps[1], &bounds::HEART_RATE)
}

/// First "<sys>/<dia>" pair, in document order, with both sides in bounds.
pub fn extract_blood_pressure(text: &str) -> Option<(u32, u32)> {
    BLOOD_PRESSURE.captures_iter(text).find_map(|caps| {
        let sys = parse_within(&caps[1], &bounds::SYSTOLIC)?;
        let dia = parse_within(&caps[2], &bounds::DIASTOLIC)?;
        Some((sys, dia))
    })
}

fn parse_within(digits: &str, range: &RangeInclusive<u32>) -> Option<u32> {
    digits.parse::<u32>().ok().filter(|v| range.contains(v))
}
