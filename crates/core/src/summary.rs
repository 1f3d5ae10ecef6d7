//! Patient summary aggregation and prompt composition.
//!
//! Takes the records fetched for one patient and reshapes them into the
//! display sections, the cross-prescription medication tally, and the
//! text-generation prompt.

use serde::Serialize;
use uuid::Uuid;

use crate::record::{self, DiseaseRecord, Medication, Prescription, Treatment};

/// Everything fetched for one prescription, before aggregation.
#[derive(Debug, Clone)]
pub struct PrescriptionBundle {
    pub prescription: Prescription,
    pub medications: Vec<Medication>,
    /// First matching treatment, when one exists.
    pub treatment: Option<Treatment>,
    /// First matching disease record, when one exists.
    pub disease: Option<DiseaseRecord>,
}

/// Display-ready view of one prescription.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionSection {
    pub prescription_id: Uuid,
    pub doctor: String,
    pub disease: String,
    pub severity: String,
    pub medications: Vec<String>,
    pub treatment_plan: String,
}

/// Tally entry: occurrence count plus one representative display line.
///
/// The stored line is the first occurrence's; later occurrences only
/// increment the count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationTotal {
    pub name: String,
    pub info: String,
    pub count: u32,
}

/// Aggregated history for one patient, ready for prompt composition.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSummary {
    /// Name as recorded on the last prescription processed. Prescriptions
    /// for one patient identifier are assumed to agree on the name; when
    /// they do not, the last one wins.
    pub patient_name: String,
    pub sections: Vec<PrescriptionSection>,
    pub medication_totals: Vec<MedicationTotal>,
}

/// Aggregate a patient's prescriptions into a summary.
///
/// Returns `None` when there is nothing to summarize, which callers treat
/// as the no-data path: no prompt is composed and no text-generation call
/// is made.
pub fn aggregate(bundles: &[PrescriptionBundle]) -> Option<PatientSummary> {
    if bundles.is_empty() {
        return None;
    }

    let mut patient_name = String::new();
    let mut sections = Vec::with_capacity(bundles.len());
    let mut totals: Vec<MedicationTotal> = Vec::new();

    for bundle in bundles {
        patient_name = bundle.prescription.patient_name.clone();

        let (disease, severity) = match &bundle.disease {
            Some(d) => (record::title_case(&d.disease), record::capitalize(&d.severity)),
            None => (
                record::UNKNOWN_DISEASE.to_string(),
                record::UNKNOWN_SEVERITY.to_string(),
            ),
        };

        let treatment_plan = bundle
            .treatment
            .as_ref()
            .map(|t| t.content.clone())
            .unwrap_or_else(|| record::NO_TREATMENT_PLAN.to_string());

        let mut lines = Vec::with_capacity(bundle.medications.len());
        for med in &bundle.medications {
            let line = med.display_line();
            match totals.iter_mut().find(|t| t.name == med.medication) {
                Some(total) => total.count += 1,
                None => totals.push(MedicationTotal {
                    name: med.medication.clone(),
                    info: line.clone(),
                    count: 1,
                }),
            }
            lines.push(line);
        }

        sections.push(PrescriptionSection {
            prescription_id: bundle.prescription.id,
            doctor: bundle.prescription.doctor_name.clone(),
            disease,
            severity,
            medications: lines,
            treatment_plan,
        });
    }

    Some(PatientSummary {
        patient_name,
        sections,
        medication_totals: totals,
    })
}

impl PatientSummary {
    /// Compose the prompt sent to the text-generation service: the
    /// prescription history, the medication-frequency section, and the
    /// instruction to produce a concise professional summary plus a
    /// medication table.
    pub fn compose_prompt(&self) -> String {
        let prescription_details = self
            .sections
            .iter()
            .map(|s| {
                let meds = s
                    .medications
                    .iter()
                    .map(|m| format!("- {m}"))
                    .collect::<Vec<_>>()
                    .join("\n");
                format!(
                    "Doctor {} diagnosed **{} ({})** and prescribed:\n{}\n\n\
                     **Treatment Plan & Advice:**\n{}",
                    s.doctor, s.disease, s.severity, meds, s.treatment_plan
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        let medication_trends = self
            .medication_totals
            .iter()
            .map(|t| format!("- {}: {} (Prescribed {} times)", t.name, t.info, t.count))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Patient: {}\n\n\
             Prescription history:\n{}\n\n\
             Commonly prescribed medications:\n{}\n\n\
             Generate a **concise, professional summary** for a doctor.\n\
             Highlight key conditions, medication trends, and treatment patterns.\n\
             Keep it **short and to the point**.\n\n\
             Additionally, create a table listing all prescribed medications, including:\n\
             - Medication Name\n\
             - Dosage\n\
             - Frequency\n\
             - Duration\n\
             - Meal Status",
            self.patient_name, prescription_details, medication_trends
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prescription(n: u128, doctor: &str, patient: &str) -> Prescription {
        Prescription {
            id: Uuid::from_u128(n),
            doctor_name: doctor.to_string(),
            patient_name: patient.to_string(),
            patient_id: Uuid::from_u128(0xA),
        }
    }

    fn med(name: &str, dose: f64) -> Medication {
        Medication {
            medication: name.to_string(),
            dose,
            dose_unit: "mg".to_string(),
            duration: 5.0,
            duration_unit: "days".to_string(),
            meal_status: "after meal".to_string(),
        }
    }

    fn bundle(n: u128, meds: Vec<Medication>) -> PrescriptionBundle {
        PrescriptionBundle {
            prescription: prescription(n, "Adams", "John Doe"),
            medications: meds,
            treatment: None,
            disease: None,
        }
    }

    #[test]
    fn empty_history_yields_none() {
        assert!(aggregate(&[]).is_none());
    }

    #[test]
    fn missing_treatment_and_disease_fall_back_to_placeholders() {
        let summary = aggregate(&[bundle(1, vec![med("Paracetamol", 500.0)])]).unwrap();
        let section = &summary.sections[0];
        assert_eq!(section.treatment_plan, "No treatment plan available.");
        assert_eq!(section.disease, "Unknown Disease");
        assert_eq!(section.severity, "Unknown Severity");
    }

    #[test]
    fn disease_and_severity_are_cased_for_display() {
        let mut b = bundle(1, vec![]);
        b.disease = Some(DiseaseRecord {
            disease: "viral fever".to_string(),
            severity: "severe".to_string(),
        });
        b.treatment = Some(Treatment {
            content: "Rest and fluids.".to_string(),
        });
        let summary = aggregate(&[b]).unwrap();
        assert_eq!(summary.sections[0].disease, "Viral Fever");
        assert_eq!(summary.sections[0].severity, "Severe");
        assert_eq!(summary.sections[0].treatment_plan, "Rest and fluids.");
    }

    #[test]
    fn tally_counts_every_occurrence_but_keeps_the_first_display_line() {
        // Two same-name medications with different doses in one prescription,
        // plus a third occurrence in a later prescription.
        let bundles = [
            bundle(1, vec![med("Paracetamol", 500.0), med("Paracetamol", 250.0)]),
            bundle(2, vec![med("Paracetamol", 650.0)]),
        ];
        let summary = aggregate(&bundles).unwrap();

        assert_eq!(summary.medication_totals.len(), 1);
        let total = &summary.medication_totals[0];
        assert_eq!(total.name, "Paracetamol");
        assert_eq!(total.count, 3);
        assert_eq!(total.info, "Paracetamol (500mg, 5 days, after meal)");
    }

    #[test]
    fn tally_preserves_first_encountered_order_across_names() {
        let bundles = [
            bundle(1, vec![med("Ibuprofen", 200.0), med("Paracetamol", 500.0)]),
            bundle(2, vec![med("Paracetamol", 500.0), med("Cetirizine", 10.0)]),
        ];
        let summary = aggregate(&bundles).unwrap();
        let names: Vec<&str> = summary
            .medication_totals
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, ["Ibuprofen", "Paracetamol", "Cetirizine"]);
    }

    #[test]
    fn patient_name_comes_from_the_last_prescription_processed() {
        let mut first = bundle(1, vec![]);
        first.prescription.patient_name = "John Doe".to_string();
        let mut last = bundle(2, vec![]);
        last.prescription.patient_name = "Jon Doe".to_string();

        let summary = aggregate(&[first, last]).unwrap();
        assert_eq!(summary.patient_name, "Jon Doe");
    }

    #[test]
    fn prompt_contains_history_trends_and_instructions() {
        let mut b = bundle(1, vec![med("Paracetamol", 500.0)]);
        b.disease = Some(DiseaseRecord {
            disease: "flu".to_string(),
            severity: "mild".to_string(),
        });
        let summary = aggregate(&[b]).unwrap();
        let prompt = summary.compose_prompt();

        assert!(prompt.starts_with("Patient: John Doe\n"));
        assert!(prompt.contains("Doctor Adams diagnosed **Flu (Mild)** and prescribed:"));
        assert!(prompt.contains("- Paracetamol (500mg, 5 days, after meal)"));
        assert!(prompt.contains("Paracetamol (500mg, 5 days, after meal) (Prescribed 1 times)"));
        assert!(prompt.contains("**concise, professional summary**"));
        assert!(prompt.contains("- Meal Status"));
    }
}
