//! carecms-core: domain logic for the clinical records insight service
//!
//! Pure aggregation over clinical documents owned by an upstream records
//! service: typed record views, patient summary composition, and per-doctor
//! disease analytics. All I/O lives in the server crate.

pub mod analytics;
pub mod outcome;
pub mod record;
pub mod summary;

// Re-export the types the server works with
pub use analytics::{CountRow, DiseaseStats, SeverityShare};
pub use outcome::{Outcome, OutcomeCode, OutcomeSeverity};
pub use record::{DiseaseRecord, Medication, Prescription, Treatment};
pub use summary::{MedicationTotal, PatientSummary, PrescriptionBundle, PrescriptionSection};
