//! Storage interface for the finance engine.
//!
//! The calculators depend only on this trait, not on any specific storage
//! engine. [`FinanceStore::create_invoice`] is the one transaction boundary:
//! either every selected entry flips to billed and the invoice is persisted,
//! or nothing changes.

mod in_memory;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{Invoice, MileageLog, Subscription, WorkLogEntry};

pub use in_memory::InMemoryStore;

/// Typed CRUD operations over the engine's persisted state.
#[async_trait]
pub trait FinanceStore: Send + Sync {
    /// Persists a new subscription.
    async fn insert_subscription(&self, subscription: Subscription) -> EngineResult<Subscription>;

    /// Lists subscriptions ordered by next billing date, then name.
    async fn list_subscriptions(&self) -> EngineResult<Vec<Subscription>>;

    /// Persists a new work log entry.
    async fn insert_work_log(&self, entry: WorkLogEntry) -> EngineResult<WorkLogEntry>;

    /// Fetches a work log entry by id.
    async fn get_work_log(&self, id: &str) -> EngineResult<Option<WorkLogEntry>>;

    /// Returns all work log entries for a client, billed or not.
    async fn work_logs_for_client(&self, client_id: &str) -> EngineResult<Vec<WorkLogEntry>>;

    /// Creates an invoice from the selected entries, all-or-nothing.
    ///
    /// Validates the selection, marks every selected entry billed, and
    /// persists the invoice in one atomic step. Duplicate ids in the
    /// selection are collapsed. On any validation failure the prior state
    /// is left fully intact.
    async fn create_invoice(
        &self,
        client_id: &str,
        entry_ids: &[String],
        issue_date: NaiveDate,
    ) -> EngineResult<Invoice>;

    /// Fetches an invoice by id.
    async fn get_invoice(&self, id: &Uuid) -> EngineResult<Option<Invoice>>;

    /// Persists a new mileage log.
    async fn insert_mileage_log(&self, log: MileageLog) -> EngineResult<MileageLog>;

    /// Returns mileage logs with dates in the inclusive range `[from, to]`.
    async fn mileage_logs_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<MileageLog>>;
}
