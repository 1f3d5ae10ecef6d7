//! Operational outcomes returned to callers.
//!
//! Every handler-boundary condition, from a malformed identifier to an
//! empty result set, surfaces as one of these bodies instead of a crash.

use serde::Serialize;

/// Severity of a reported outcome.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeSeverity {
    Error,
    Warning,
}

/// Machine-readable outcome code.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OutcomeCode {
    InvalidIdentifier,
    MissingParameter,
    NoData,
    Unauthorized,
    Forbidden,
    Throttled,
    StoreFailure,
}

/// User-facing outcome body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub severity: OutcomeSeverity,
    pub code: OutcomeCode,
    pub message: String,
}

impl Outcome {
    pub fn error(code: OutcomeCode, message: impl Into<String>) -> Self {
        Self {
            severity: OutcomeSeverity::Error,
            code,
            message: message.into(),
        }
    }

    /// Warnings cover the empty-result paths, which are not errors.
    pub fn warning(code: OutcomeCode, message: impl Into<String>) -> Self {
        Self {
            severity: OutcomeSeverity::Warning,
            code,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_serialize_as_kebab_case() {
        let outcome = Outcome::warning(OutcomeCode::NoData, "No prescriptions found.");
        let body = serde_json::to_value(&outcome).unwrap();
        assert_eq!(body["severity"], "warning");
        assert_eq!(body["code"], "no-data");
        assert_eq!(body["message"], "No prescriptions found.");
    }

    #[test]
    fn errors_carry_their_code() {
        let outcome = Outcome::error(OutcomeCode::InvalidIdentifier, "bad id");
        let body = serde_json::to_value(&outcome).unwrap();
        assert_eq!(body["severity"], "error");
        assert_eq!(body["code"], "invalid-identifier");
    }
}
