//! Calculation logic for the finance engine.
//!
//! This module contains the pure calculation functions: billing-date
//! projection for subscriptions, tiered mileage claim calculation with
//! tax-year summaries, unbilled work-log aggregation, and invoice selection
//! validation. None of these functions touch storage; they operate on
//! already-loaded data and are invoked synchronously per request.

mod billing_cycle;
mod invoice;
mod mileage;
mod work_log;

pub use billing_cycle::next_occurrence;
pub use invoice::{next_invoice_number, validate_selection};
pub use mileage::{
    MileageClaimResult, TaxYearSummary, calculate_claim, summarize_tax_year, tax_year_bounds,
    tax_year_starting,
};
pub use work_log::{UnbilledEntry, UnbilledWork, aggregate_unbilled};
