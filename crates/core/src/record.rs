//! Typed views over the externally owned clinical document store.
//!
//! All four collections are jsonb documents written by the upstream
//! clinical-records service. This system never creates or mutates them;
//! the structs here deserialize the fields it reads and format them for
//! display. Field names follow the store's camelCase convention.

use serde::Deserialize;
use uuid::Uuid;

/// Placeholder when a prescription has no treatment record.
pub const NO_TREATMENT_PLAN: &str = "No treatment plan available.";

/// Placeholder pair when a prescription has no disease record.
pub const UNKNOWN_DISEASE: &str = "Unknown Disease";
pub const UNKNOWN_SEVERITY: &str = "Unknown Severity";

/// Root clinical record linking a doctor, a patient, and a treatment episode.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    /// Store identifier, attached from the row key rather than the document.
    #[serde(skip)]
    pub id: Uuid,
    pub doctor_name: String,
    pub patient_name: String,
    pub patient_id: Uuid,
}

/// A single prescribed drug entry with dosing metadata.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    /// Drug name, as the store calls it.
    pub medication: String,
    pub dose: f64,
    pub dose_unit: String,
    pub duration: f64,
    pub duration_unit: String,
    pub meal_status: String,
}

impl Medication {
    /// Display line in the fixed `name (doseUnit, duration unit, meal)` shape
    /// consumed by both the prompt and the rendering layer.
    pub fn display_line(&self) -> String {
        format!(
            "{} ({}{}, {} {}, {})",
            self.medication,
            fmt_amount(self.dose),
            self.dose_unit,
            fmt_amount(self.duration),
            self.duration_unit,
            self.meal_status
        )
    }
}

/// Free-text plan/advice associated with a prescription.
#[derive(Debug, Clone, Deserialize)]
pub struct Treatment {
    pub content: String,
}

/// Diagnosis entry pairing a disease name with a severity label.
///
/// The same collection serves two flows: records linked to a prescription
/// feed the patient summary, records linked to a doctor feed analytics.
#[derive(Debug, Clone, Deserialize)]
pub struct DiseaseRecord {
    pub disease: String,
    pub severity: String,
}

/// Integral amounts print without a trailing `.0`.
fn fmt_amount(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// Uppercase the first character, lowercase everything after it.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn med(name: &str, dose: f64, duration: f64) -> Medication {
        Medication {
            medication: name.to_string(),
            dose,
            dose_unit: "mg".to_string(),
            duration,
            duration_unit: "days".to_string(),
            meal_status: "after meal".to_string(),
        }
    }

    #[test]
    fn display_line_matches_fixed_shape() {
        assert_eq!(
            med("Paracetamol", 500.0, 5.0).display_line(),
            "Paracetamol (500mg, 5 days, after meal)"
        );
    }

    #[test]
    fn display_line_keeps_fractional_amounts() {
        assert_eq!(
            med("Amoxicillin", 2.5, 7.0).display_line(),
            "Amoxicillin (2.5mg, 7 days, after meal)"
        );
    }

    #[test]
    fn title_case_handles_multi_word_and_punctuated_names() {
        assert_eq!(title_case("flu"), "Flu");
        assert_eq!(title_case("viral fever"), "Viral Fever");
        assert_eq!(title_case("COVID-19"), "Covid-19");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn capitalize_lowercases_the_tail() {
        assert_eq!(capitalize("severe"), "Severe");
        assert_eq!(capitalize("MILD"), "Mild");
        assert_eq!(capitalize(""), "");
    }
}
