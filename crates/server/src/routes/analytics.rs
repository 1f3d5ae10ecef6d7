//! Disease analytics endpoint

use axum::{
    Extension, Json,
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use deadpool_postgres::Pool;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use carecms_core::analytics::DiseaseStats;
use carecms_core::outcome::{Outcome, OutcomeCode};

use crate::cache::AnalyticsCache;
use crate::db::RecordRepository;
use crate::error::AppError;
use crate::middleware::auth;

/// Query parameters for the analytics page
#[derive(Debug, Deserialize)]
pub struct AnalyticsParams {
    #[serde(rename = "doctorId")]
    doctor_id: Option<String>,
}

/// Response body for doctor analytics; the chart layer consumes the
/// flattened tables as-is.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    doctor_id: Uuid,
    #[serde(flatten)]
    stats: DiseaseStats,
}

/// GET /api/analytics?doctorId= — derive chart tables and KPI scalars from
/// a doctor's disease records
pub async fn get(
    State(pool): State<Pool>,
    Extension(cache): Extension<AnalyticsCache>,
    Query(params): Query<AnalyticsParams>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let raw = params.doctor_id.ok_or(AppError::MissingParameter("doctorId"))?;
    let doctor_id = Uuid::parse_str(&raw).map_err(|_| {
        AppError::InvalidIdentifier(format!("'{raw}' is not a valid doctor identifier"))
    })?;
    auth::require_subject_match(&headers, doctor_id)?;

    let records = match cache.get(&doctor_id) {
        Some(records) => {
            tracing::debug!(doctor_id = %doctor_id, "Analytics cache hit");
            records
        }
        None => {
            let repo = RecordRepository::new(pool);
            let fetched = repo.diseases_for_doctor(doctor_id).await?;
            cache.insert(doctor_id, fetched)
        }
    };

    let Some(stats) = DiseaseStats::from_records(&records) else {
        tracing::info!(doctor_id = %doctor_id, "No disease records found");
        let outcome = Outcome::warning(OutcomeCode::NoData, "No data found for this doctor.");
        return Ok(Json(outcome).into_response());
    };

    Ok(Json(AnalyticsResponse { doctor_id, stats }).into_response())
}
