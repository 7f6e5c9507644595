//! Configuration for the finance engine.
//!
//! Reimbursement rates are data, not code: they are loaded from a YAML file
//! so a rate change does not require a rebuild.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, MileageRates};
