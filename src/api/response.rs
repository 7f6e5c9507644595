//! Response types for the finance engine API.
//!
//! This module defines the error response structures and the mapping from
//! engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::BillingCycle;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::InvalidCycle { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_CYCLE",
                    message,
                    "Supported cycles are DAILY, WEEKLY, MONTHLY, QUARTERLY, YEARLY",
                ),
            },
            EngineError::InvalidInput { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_INPUT", message),
            },
            EngineError::EmptySelection => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("EMPTY_SELECTION", message),
            },
            EngineError::CrossClientSelection { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("CROSS_CLIENT_SELECTION", message),
            },
            EngineError::AlreadyBilled { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "ALREADY_BILLED",
                    message,
                    "The entry was billed by another invoice, possibly from a concurrent submission",
                ),
            },
            EngineError::EntryNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("ENTRY_NOT_FOUND", message),
            },
            EngineError::InvoiceNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("INVOICE_NOT_FOUND", message),
            },
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
            EngineError::Storage { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("STORAGE_ERROR", "Storage error", message),
            },
            EngineError::CalculationError { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            },
        }
    }
}

/// Response body for `POST /subscriptions/next-billing-date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextBillingDateResponse {
    /// The start date the projection was made from.
    pub start_date: NaiveDate,
    /// The parsed billing cadence.
    pub cycle: BillingCycle,
    /// The projected next billing date.
    pub next_billing_date: NaiveDate,
}

/// Response body for `POST /mileage`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordMileageResponse {
    /// Identifier of the stored log.
    pub id: Uuid,
    /// The date of the journey.
    pub date: NaiveDate,
    /// The client the journey was made for.
    pub client_id: String,
    /// Miles driven.
    pub miles: Decimal,
    /// The portion reimbursed at the high rate.
    pub miles_at_high_rate: Decimal,
    /// The portion reimbursed at the low rate.
    pub miles_at_low_rate: Decimal,
    /// Total claim divided by miles.
    pub effective_rate: Decimal,
    /// The claimable amount.
    pub total_claim: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_invalid_cycle_maps_to_400() {
        let engine_error = EngineError::InvalidCycle {
            cycle: "FORTNIGHTLY".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_CYCLE");
    }

    #[test]
    fn test_already_billed_maps_to_409() {
        let engine_error = EngineError::AlreadyBilled {
            entry_id: "wl_001".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::CONFLICT);
        assert_eq!(api_error.error.code, "ALREADY_BILLED");
    }

    #[test]
    fn test_entry_not_found_maps_to_404() {
        let engine_error = EngineError::EntryNotFound {
            entry_id: "wl_404".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "ENTRY_NOT_FOUND");
    }

    #[test]
    fn test_storage_error_maps_to_500() {
        let engine_error = EngineError::Storage {
            message: "lock poisoned".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "STORAGE_ERROR");
    }
}
