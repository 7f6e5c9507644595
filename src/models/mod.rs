//! Core data models for the finance engine.
//!
//! This module contains all the domain models used throughout the engine.

mod invoice;
mod mileage;
mod subscription;
mod work_log;

pub use invoice::Invoice;
pub use mileage::MileageLog;
pub use subscription::{BillingCycle, Subscription};
pub use work_log::WorkLogEntry;
