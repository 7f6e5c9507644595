//! Request types for the finance engine API.
//!
//! Dates arrive as ISO-8601 strings and monetary or mileage figures as
//! decimal strings, matching what the form layer submits. Billing cycles
//! arrive as raw tokens and are parsed at the handler boundary so an unknown
//! cadence surfaces as `INVALID_CYCLE` rather than a deserialization error.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request body for `POST /subscriptions/next-billing-date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextBillingDateRequest {
    /// The subscription's start date.
    pub start_date: NaiveDate,
    /// The billing cadence token (e.g., "MONTHLY").
    pub cycle: String,
}

/// Request body for `POST /subscriptions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubscriptionRequest {
    /// Display name for the subscription.
    pub name: String,
    /// The amount charged each cycle.
    pub amount: Decimal,
    /// The subscription's start date.
    pub start_date: NaiveDate,
    /// The billing cadence token.
    pub cycle: String,
}

/// Query parameters for `GET /mileage/claim`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MileageClaimQuery {
    /// Miles in the trip being previewed.
    pub miles: Decimal,
    /// Cumulative mileage already claimed this tax year.
    #[serde(default)]
    pub year_to_date: Decimal,
}

/// Request body for `POST /mileage`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordMileageRequest {
    /// The date of the journey.
    pub date: NaiveDate,
    /// The client the journey was made for.
    pub client_id: String,
    /// Business purpose of the journey.
    #[serde(default)]
    pub purpose: String,
    /// Miles driven.
    pub miles: Decimal,
}

/// Query parameters for `GET /mileage/summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MileageSummaryQuery {
    /// Calendar year in which the tax year starts (6 April). Defaults to
    /// the tax year containing today.
    #[serde(default)]
    pub year: Option<i32>,
}

/// Request body for `POST /work-logs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWorkLogRequest {
    /// The client the work was performed for.
    pub client_id: String,
    /// The date the work was performed.
    pub work_date: NaiveDate,
    /// Hours worked.
    pub hours_worked: Decimal,
    /// Hourly rate charged.
    pub hourly_rate: Decimal,
}

/// Request body for `POST /invoices`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInvoiceRequest {
    /// The client the invoice is addressed to.
    pub client_id: String,
    /// Ids of the work log entries to include.
    pub entry_ids: Vec<String>,
    /// Issue date; defaults to today when omitted.
    #[serde(default)]
    pub issue_date: Option<NaiveDate>,
}
