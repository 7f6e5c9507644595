//! In-memory implementation of the storage interface.
//!
//! Backs the engine in tests and single-process deployments. All state sits
//! behind one `RwLock`; invoice creation takes the write lock for the whole
//! validate-then-mutate sequence, which is what makes two concurrent
//! submissions over the same entry resolve to exactly one success and one
//! `AlreadyBilled`.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::calculation::{next_invoice_number, validate_selection};
use crate::error::{EngineError, EngineResult};
use crate::models::{Invoice, MileageLog, Subscription, WorkLogEntry};

use super::FinanceStore;

#[derive(Default)]
struct StoreInner {
    subscriptions: HashMap<Uuid, Subscription>,
    work_logs: HashMap<String, WorkLogEntry>,
    invoices: HashMap<Uuid, Invoice>,
    mileage_logs: HashMap<Uuid, MileageLog>,
}

/// In-memory finance store.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> EngineResult<std::sync::RwLockReadGuard<'_, StoreInner>> {
        self.inner.read().map_err(|e| EngineError::Storage {
            message: format!("failed to acquire read lock: {}", e),
        })
    }

    fn write(&self) -> EngineResult<std::sync::RwLockWriteGuard<'_, StoreInner>> {
        self.inner.write().map_err(|e| EngineError::Storage {
            message: format!("failed to acquire write lock: {}", e),
        })
    }
}

#[async_trait]
impl FinanceStore for InMemoryStore {
    async fn insert_subscription(&self, subscription: Subscription) -> EngineResult<Subscription> {
        let mut inner = self.write()?;
        inner
            .subscriptions
            .insert(subscription.id, subscription.clone());
        Ok(subscription)
    }

    async fn list_subscriptions(&self) -> EngineResult<Vec<Subscription>> {
        let inner = self.read()?;
        let mut subscriptions: Vec<Subscription> =
            inner.subscriptions.values().cloned().collect();
        subscriptions.sort_by(|a, b| {
            a.next_billing_date
                .cmp(&b.next_billing_date)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(subscriptions)
    }

    async fn insert_work_log(&self, entry: WorkLogEntry) -> EngineResult<WorkLogEntry> {
        let mut inner = self.write()?;
        inner.work_logs.insert(entry.id.clone(), entry.clone());
        Ok(entry)
    }

    async fn get_work_log(&self, id: &str) -> EngineResult<Option<WorkLogEntry>> {
        let inner = self.read()?;
        Ok(inner.work_logs.get(id).cloned())
    }

    async fn work_logs_for_client(&self, client_id: &str) -> EngineResult<Vec<WorkLogEntry>> {
        let inner = self.read()?;
        Ok(inner
            .work_logs
            .values()
            .filter(|entry| entry.client_id == client_id)
            .cloned()
            .collect())
    }

    async fn create_invoice(
        &self,
        client_id: &str,
        entry_ids: &[String],
        issue_date: NaiveDate,
    ) -> EngineResult<Invoice> {
        // One write lock for the whole operation: validation and mutation
        // cannot interleave with another submission.
        let mut inner = self.write()?;

        let mut selected_ids: Vec<String> = Vec::with_capacity(entry_ids.len());
        for id in entry_ids {
            if !selected_ids.contains(id) {
                selected_ids.push(id.clone());
            }
        }

        if selected_ids.is_empty() {
            return Err(EngineError::EmptySelection);
        }

        let mut selected = Vec::with_capacity(selected_ids.len());
        for id in &selected_ids {
            let entry = inner
                .work_logs
                .get(id)
                .ok_or_else(|| EngineError::EntryNotFound {
                    entry_id: id.clone(),
                })?;
            selected.push(entry.clone());
        }

        let total_amount = validate_selection(client_id, &selected)?;

        let invoice_number =
            next_invoice_number(inner.invoices.values().map(|i| i.invoice_number.as_str()));
        let invoice = Invoice {
            id: Uuid::new_v4(),
            invoice_number,
            client_id: client_id.to_string(),
            issue_date,
            entry_ids: selected_ids.clone(),
            total_amount,
            created_at: Utc::now(),
        };

        // Validation passed: flip every selected entry and persist.
        for id in &selected_ids {
            if let Some(entry) = inner.work_logs.get_mut(id) {
                entry.billed = true;
            }
        }
        inner.invoices.insert(invoice.id, invoice.clone());

        Ok(invoice)
    }

    async fn get_invoice(&self, id: &Uuid) -> EngineResult<Option<Invoice>> {
        let inner = self.read()?;
        Ok(inner.invoices.get(id).cloned())
    }

    async fn insert_mileage_log(&self, log: MileageLog) -> EngineResult<MileageLog> {
        let mut inner = self.write()?;
        inner.mileage_logs.insert(log.id, log.clone());
        Ok(log)
    }

    async fn mileage_logs_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<MileageLog>> {
        let inner = self.read()?;
        Ok(inner
            .mileage_logs
            .values()
            .filter(|log| log.date >= from && log.date <= to)
            .cloned()
            .collect())
    }
}
