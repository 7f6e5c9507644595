//! Error types for the finance engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during calculation and storage.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the finance engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use finance_engine::error::EngineError;
///
/// let error = EngineError::InvalidCycle {
///     cycle: "FORTNIGHTLY".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid billing cycle: FORTNIGHTLY");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A billing cycle token was not one of the five supported cadences.
    #[error("Invalid billing cycle: {cycle}")]
    InvalidCycle {
        /// The token that could not be parsed.
        cycle: String,
    },

    /// A numeric or date field failed validation.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// An invoice was requested with no work log entries selected.
    #[error("No work log entries selected for the invoice")]
    EmptySelection,

    /// A selected work log entry belongs to a different client.
    #[error("Work log entry '{entry_id}' does not belong to client '{client_id}'")]
    CrossClientSelection {
        /// The offending entry.
        entry_id: String,
        /// The client the invoice was being created for.
        client_id: String,
    },

    /// A selected work log entry has already been billed on another invoice.
    #[error("Work log entry '{entry_id}' has already been billed")]
    AlreadyBilled {
        /// The entry that is already billed.
        entry_id: String,
    },

    /// A selected work log entry does not exist.
    #[error("Work log entry not found: {entry_id}")]
    EntryNotFound {
        /// The id that was not found.
        entry_id: String,
    },

    /// An invoice with the given id does not exist.
    #[error("Invoice not found: {id}")]
    InvoiceNotFound {
        /// The id that was not found.
        id: Uuid,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or failed validation.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The storage backend failed.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
