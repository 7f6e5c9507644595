//! HTTP API module for the finance engine.
//!
//! This module provides the REST endpoints for billing date projection,
//! mileage claims, unbilled work queries, and invoice creation.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CreateInvoiceRequest, CreateSubscriptionRequest, CreateWorkLogRequest, MileageClaimQuery,
    MileageSummaryQuery, NextBillingDateRequest, RecordMileageRequest,
};
pub use response::ApiError;
pub use state::AppState;
