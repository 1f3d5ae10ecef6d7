//! Patient summary endpoint

use axum::{
    Extension, Json,
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use deadpool_postgres::Pool;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use carecms_core::outcome::{Outcome, OutcomeCode};
use carecms_core::summary::{self, MedicationTotal, PrescriptionBundle, PrescriptionSection};

use crate::ai::{ClaudeClient, summarizer};
use crate::db::RecordRepository;
use crate::error::AppError;
use crate::middleware::auth;

/// Query parameters for the summary page
#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    #[serde(rename = "patientId")]
    patient_id: Option<String>,
}

/// Response body for a patient summary
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    patient_id: Uuid,
    patient_name: String,
    prescriptions: Vec<PrescriptionSection>,
    medication_totals: Vec<MedicationTotal>,
    summary: String,
    /// False when the summary is the fixed fallback string.
    ai_generated: bool,
}

/// GET /api/summary?patientId= — aggregate a patient's history and
/// summarize it.
///
/// Prescriptions are enriched one at a time; records are small and the
/// store is the only collaborator, so there is no parallel fetch.
pub async fn get(
    State(pool): State<Pool>,
    Extension(client): Extension<Option<ClaudeClient>>,
    Query(params): Query<SummaryParams>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let raw = params.patient_id.ok_or(AppError::MissingParameter("patientId"))?;
    let patient_id = Uuid::parse_str(&raw).map_err(|_| {
        AppError::InvalidIdentifier(format!("'{raw}' is not a valid patient identifier"))
    })?;
    auth::require_subject_match(&headers, patient_id)?;

    let repo = RecordRepository::new(pool);
    let prescriptions = repo.prescriptions_for_patient(patient_id).await?;

    let mut bundles = Vec::with_capacity(prescriptions.len());
    for prescription in prescriptions {
        let medications = repo.medications_for_prescription(prescription.id).await?;
        let treatment = repo.treatment_for_prescription(prescription.id).await?;
        let disease = repo.disease_for_prescription(prescription.id).await?;
        bundles.push(PrescriptionBundle {
            prescription,
            medications,
            treatment,
            disease,
        });
    }

    // No prescriptions is a valid empty result, and means no prompt is
    // composed and no text-generation call is made.
    let Some(aggregated) = summary::aggregate(&bundles) else {
        tracing::info!(patient_id = %patient_id, "No prescriptions found");
        let outcome = Outcome::warning(
            OutcomeCode::NoData,
            "No prescriptions found for this patient.",
        );
        return Ok(Json(outcome).into_response());
    };

    let (summary_text, ai_generated) =
        summarizer::summarize_or_fallback(client.as_ref(), &aggregated).await;

    tracing::info!(
        patient_id = %patient_id,
        prescriptions = aggregated.sections.len(),
        ai_generated = ai_generated,
        "Patient summary produced"
    );

    Ok(Json(SummaryResponse {
        patient_id,
        patient_name: aggregated.patient_name,
        prescriptions: aggregated.sections,
        medication_totals: aggregated.medication_totals,
        summary: summary_text,
        ai_generated,
    })
    .into_response())
}
