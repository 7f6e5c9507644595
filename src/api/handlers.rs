//! HTTP request handlers for the finance engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    aggregate_unbilled, calculate_claim, next_occurrence, summarize_tax_year, tax_year_bounds,
    tax_year_starting,
};
use crate::error::EngineError;
use crate::models::{BillingCycle, MileageLog, Subscription, WorkLogEntry};

use super::request::{
    CreateInvoiceRequest, CreateSubscriptionRequest, CreateWorkLogRequest, MileageClaimQuery,
    MileageSummaryQuery, NextBillingDateRequest, RecordMileageRequest,
};
use super::response::{ApiError, ApiErrorResponse, NextBillingDateResponse, RecordMileageResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/subscriptions/next-billing-date",
            post(next_billing_date_handler),
        )
        .route(
            "/subscriptions",
            post(create_subscription_handler).get(list_subscriptions_handler),
        )
        .route("/mileage/claim", get(mileage_claim_handler))
        .route("/mileage", post(record_mileage_handler))
        .route("/mileage/summary", get(mileage_summary_handler))
        .route("/work-logs", post(create_work_log_handler))
        .route("/clients/:client_id/unbilled-work", get(unbilled_work_handler))
        .route("/invoices", post(create_invoice_handler))
        .route("/invoices/:id", get(get_invoice_handler))
        .with_state(state)
}

/// Converts a JSON extraction failure into the API error shape.
fn json_rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => ApiError::new(
            "MISSING_CONTENT_TYPE",
            "Content-Type must be application/json",
        ),
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    }
}

/// Converts a query-string extraction failure into the API error shape.
fn query_rejection_error(correlation_id: Uuid, rejection: QueryRejection) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %rejection, "Query string error");
    ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error: ApiError::new("INVALID_INPUT", rejection.to_string()),
    }
}

/// Handler for `POST /subscriptions/next-billing-date`.
///
/// Projects the next billing date for the submitted start date and cycle.
/// Pure preview: nothing is persisted, so the form can call this on every
/// input change before save.
async fn next_billing_date_handler(
    payload: Result<Json<NextBillingDateRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_error(correlation_id, rejection).into_response(),
    };

    let result = BillingCycle::from_str(&request.cycle)
        .and_then(|cycle| next_occurrence(request.start_date, cycle).map(|next| (cycle, next)));

    match result {
        Ok((cycle, next_billing_date)) => {
            info!(
                correlation_id = %correlation_id,
                start_date = %request.start_date,
                cycle = %cycle,
                next_billing_date = %next_billing_date,
                "Projected next billing date"
            );
            Json(NextBillingDateResponse {
                start_date: request.start_date,
                cycle,
                next_billing_date,
            })
            .into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Billing date projection failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `POST /subscriptions`.
async fn create_subscription_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateSubscriptionRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_error(correlation_id, rejection).into_response(),
    };

    if request.amount < Decimal::ZERO {
        return ApiErrorResponse::from(EngineError::InvalidInput {
            field: "amount".to_string(),
            message: "must not be negative".to_string(),
        })
        .into_response();
    }

    let created = async {
        let cycle = BillingCycle::from_str(&request.cycle)?;
        let next_billing_date = next_occurrence(request.start_date, cycle)?;
        let subscription = Subscription {
            id: Uuid::new_v4(),
            name: request.name.clone(),
            amount: request.amount,
            start_date: request.start_date,
            cycle,
            next_billing_date,
        };
        state.store().insert_subscription(subscription).await
    }
    .await;

    match created {
        Ok(subscription) => {
            info!(
                correlation_id = %correlation_id,
                subscription_id = %subscription.id,
                next_billing_date = %subscription.next_billing_date,
                "Subscription created"
            );
            (StatusCode::CREATED, Json(subscription)).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Subscription creation failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `GET /subscriptions`.
async fn list_subscriptions_handler(State(state): State<AppState>) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    match state.store().list_subscriptions().await {
        Ok(subscriptions) => {
            info!(
                correlation_id = %correlation_id,
                count = subscriptions.len(),
                "Subscriptions listed"
            );
            Json(subscriptions).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Subscription listing failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `GET /mileage/claim`.
///
/// Read-only live preview for the mileage form; the caller supplies the
/// year-to-date figure and nothing is persisted.
async fn mileage_claim_handler(
    State(state): State<AppState>,
    query: Result<Query<MileageClaimQuery>, QueryRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(q)) => q,
        Err(rejection) => return query_rejection_error(correlation_id, rejection).into_response(),
    };

    match calculate_claim(query.miles, query.year_to_date, state.config().mileage_rates()) {
        Ok(claim) => {
            info!(
                correlation_id = %correlation_id,
                miles = %claim.miles,
                total_claim = %claim.total_claim,
                "Mileage claim previewed"
            );
            Json(claim).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Mileage claim preview failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `POST /mileage`.
///
/// Records a journey. The year-to-date figure is taken from the logs already
/// stored in the journey's tax year, so the tier split does not depend on
/// what the form displayed.
async fn record_mileage_handler(
    State(state): State<AppState>,
    payload: Result<Json<RecordMileageRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_error(correlation_id, rejection).into_response(),
    };

    let recorded = async {
        let (year_start, year_end) = tax_year_bounds(request.date);
        let logs = state
            .store()
            .mileage_logs_between(year_start, year_end)
            .await?;
        let year_to_date: Decimal = logs.iter().map(|log| log.miles).sum();

        let claim = calculate_claim(request.miles, year_to_date, state.config().mileage_rates())?;

        let log = MileageLog {
            id: Uuid::new_v4(),
            date: request.date,
            client_id: request.client_id.clone(),
            purpose: request.purpose.clone(),
            miles: request.miles,
            total_claim: claim.total_claim,
        };
        let log = state.store().insert_mileage_log(log).await?;
        Ok::<_, EngineError>((log, claim))
    }
    .await;

    match recorded {
        Ok((log, claim)) => {
            info!(
                correlation_id = %correlation_id,
                log_id = %log.id,
                miles = %log.miles,
                total_claim = %log.total_claim,
                "Mileage log recorded"
            );
            (
                StatusCode::CREATED,
                Json(RecordMileageResponse {
                    id: log.id,
                    date: log.date,
                    client_id: log.client_id,
                    miles: log.miles,
                    miles_at_high_rate: claim.miles_at_high_rate,
                    miles_at_low_rate: claim.miles_at_low_rate,
                    effective_rate: claim.effective_rate,
                    total_claim: claim.total_claim,
                }),
            )
                .into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Mileage recording failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `GET /mileage/summary`.
async fn mileage_summary_handler(
    State(state): State<AppState>,
    query: Result<Query<MileageSummaryQuery>, QueryRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(q)) => q,
        Err(rejection) => return query_rejection_error(correlation_id, rejection).into_response(),
    };

    let bounds = match query.year {
        Some(year) => match tax_year_starting(year) {
            Ok(bounds) => bounds,
            Err(err) => {
                warn!(correlation_id = %correlation_id, error = %err, "Mileage summary rejected");
                return ApiErrorResponse::from(err).into_response();
            }
        },
        None => tax_year_bounds(Utc::now().date_naive()),
    };

    match state.store().mileage_logs_between(bounds.0, bounds.1).await {
        Ok(logs) => {
            let summary = summarize_tax_year(&logs, bounds, state.config().mileage_rates());
            Json(summary).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Mileage summary failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `POST /work-logs`.
async fn create_work_log_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateWorkLogRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_error(correlation_id, rejection).into_response(),
    };

    let entry = WorkLogEntry {
        id: Uuid::new_v4().to_string(),
        client_id: request.client_id,
        work_date: request.work_date,
        hours_worked: request.hours_worked,
        hourly_rate: request.hourly_rate,
        billed: false,
    };

    let created = async {
        entry.validate()?;
        state.store().insert_work_log(entry).await
    }
    .await;

    match created {
        Ok(entry) => {
            info!(
                correlation_id = %correlation_id,
                entry_id = %entry.id,
                client_id = %entry.client_id,
                total_amount = %entry.total_amount(),
                "Work log entry created"
            );
            (StatusCode::CREATED, Json(entry)).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Work log creation failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `GET /clients/:client_id/unbilled-work`.
///
/// Returns the candidate entries for invoice creation: the client's unbilled
/// work ordered by date, with derived amounts. Read-only.
async fn unbilled_work_handler(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    match state.store().work_logs_for_client(&client_id).await {
        Ok(entries) => {
            let unbilled = aggregate_unbilled(&client_id, &entries);
            info!(
                correlation_id = %correlation_id,
                client_id = %unbilled.client_id,
                entries = unbilled.entries.len(),
                total_amount = %unbilled.total_amount,
                "Unbilled work listed"
            );
            Json(unbilled).into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                client_id = %client_id,
                error = %err,
                "Unbilled work listing failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `POST /invoices`.
async fn create_invoice_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateInvoiceRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_error(correlation_id, rejection).into_response(),
    };

    let issue_date = request
        .issue_date
        .unwrap_or_else(|| Utc::now().date_naive());

    match state
        .store()
        .create_invoice(&request.client_id, &request.entry_ids, issue_date)
        .await
    {
        Ok(invoice) => {
            info!(
                correlation_id = %correlation_id,
                invoice_id = %invoice.id,
                invoice_number = %invoice.invoice_number,
                client_id = %invoice.client_id,
                total_amount = %invoice.total_amount,
                entries = invoice.entry_ids.len(),
                "Invoice created"
            );
            (StatusCode::CREATED, Json(invoice)).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Invoice creation failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `GET /invoices/:id`.
async fn get_invoice_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let found = async {
        state
            .store()
            .get_invoice(&id)
            .await?
            .ok_or(EngineError::InvoiceNotFound { id })
    }
    .await;

    match found {
        Ok(invoice) => Json(invoice).into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}
