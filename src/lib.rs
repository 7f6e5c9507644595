//! Recurring-billing and reimbursement calculation engine for a personal
//! finance tracker.
//!
//! This crate projects subscription billing dates, calculates tiered mileage
//! reimbursement claims, aggregates unbilled work-time entries, and assembles
//! invoices from them. The calculators are pure functions over loaded data;
//! persistence goes through the [`store::FinanceStore`] trait and the HTTP
//! surface lives in [`api`].

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
