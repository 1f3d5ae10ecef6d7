use deadpool_postgres::Pool;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use carecms_core::record::{DiseaseRecord, Medication, Prescription, Treatment};

use crate::error::AppError;

/// Read-only repository over the externally owned clinical document store.
///
/// Each collection is a table of `(id uuid, doc jsonb)` rows written by the
/// upstream clinical-records service. This service only issues equality
/// filters on named document fields; rows are ordered by id so repeated
/// reads process records in a stable order.
#[derive(Clone)]
pub struct RecordRepository {
    pool: Pool,
}

impl RecordRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// All prescriptions whose `patientId` field equals the identifier.
    pub async fn prescriptions_for_patient(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<Prescription>, AppError> {
        let client = self.pool.get().await?;
        let rows = client
            .query(
                "SELECT id, doc FROM prescriptions WHERE doc->>'patientId' = $1 ORDER BY id",
                &[&patient_id.to_string()],
            )
            .await?;

        let mut prescriptions = Vec::with_capacity(rows.len());
        for row in rows {
            let mut prescription: Prescription = decode(row.get(1), "prescription")?;
            prescription.id = row.get(0);
            prescriptions.push(prescription);
        }
        Ok(prescriptions)
    }

    /// All medications whose `prescriptionId` field equals the identifier.
    pub async fn medications_for_prescription(
        &self,
        prescription_id: Uuid,
    ) -> Result<Vec<Medication>, AppError> {
        let client = self.pool.get().await?;
        let rows = client
            .query(
                "SELECT doc FROM medications WHERE doc->>'prescriptionId' = $1 ORDER BY id",
                &[&prescription_id.to_string()],
            )
            .await?;

        rows.into_iter()
            .map(|row| decode(row.get(0), "medication"))
            .collect()
    }

    /// First treatment for the prescription, if any.
    pub async fn treatment_for_prescription(
        &self,
        prescription_id: Uuid,
    ) -> Result<Option<Treatment>, AppError> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(
                "SELECT doc FROM treatments WHERE doc->>'prescriptionId' = $1 ORDER BY id LIMIT 1",
                &[&prescription_id.to_string()],
            )
            .await?;

        row.map(|row| decode(row.get(0), "treatment")).transpose()
    }

    /// First disease record for the prescription, if any.
    pub async fn disease_for_prescription(
        &self,
        prescription_id: Uuid,
    ) -> Result<Option<DiseaseRecord>, AppError> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(
                "SELECT doc FROM disease_records WHERE doc->>'prescriptionId' = $1 \
                 ORDER BY id LIMIT 1",
                &[&prescription_id.to_string()],
            )
            .await?;

        row.map(|row| decode(row.get(0), "disease record"))
            .transpose()
    }

    /// All disease records whose `doctorId` field equals the identifier.
    /// Internal identifiers are projected out; callers only see the
    /// disease/severity payload.
    pub async fn diseases_for_doctor(
        &self,
        doctor_id: Uuid,
    ) -> Result<Vec<DiseaseRecord>, AppError> {
        let client = self.pool.get().await?;
        let rows = client
            .query(
                "SELECT doc FROM disease_records WHERE doc->>'doctorId' = $1 ORDER BY id",
                &[&doctor_id.to_string()],
            )
            .await?;

        rows.into_iter()
            .map(|row| decode(row.get(0), "disease record"))
            .collect()
    }
}

/// Deserialize a document, reporting the collection on failure.
fn decode<T: serde::de::DeserializeOwned>(doc: JsonValue, collection: &str) -> Result<T, AppError> {
    serde_json::from_value(doc)
        .map_err(|e| AppError::Store(format!("Malformed {collection} document: {e}")))
}
