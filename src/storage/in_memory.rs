use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::BillsplitError;
use crate::models::{Bill, Group, Invoice, SettlementRecord};
use crate::storage::Storage;

#[derive(Default)]
struct State {
    groups: HashMap<String, Group>,
    bills: HashMap<String, Bill>,
    invoices: HashMap<String, Invoice>,
    records: HashMap<String, Vec<SettlementRecord>>, // invoice_id -> records
}

/// In-memory store. All tables sit behind one lock so that
/// `commit_settlement` is a real unit of work: the unsettled-set check, the
/// invoice/record inserts and the settled-flag flips happen under the same
/// guard, the way a relational backend would use one transaction.
pub struct InMemoryStorage {
    state: Mutex<State>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            state: Mutex::new(State::default()),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn unsettled_ids(state: &State, group_id: &str) -> Vec<String> {
    let mut ids: Vec<String> = state
        .bills
        .values()
        .filter(|b| b.group_id == group_id && !b.settled)
        .map(|b| b.id.clone())
        .collect();
    ids.sort();
    ids
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn save_group(&self, group: Group) -> Result<(), BillsplitError> {
        let mut state = self.state.lock().await;
        state.groups.insert(group.id.clone(), group);
        Ok(())
    }

    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, BillsplitError> {
        Ok(self.state.lock().await.groups.get(group_id).cloned())
    }

    async fn save_bill(&self, bill: Bill) -> Result<(), BillsplitError> {
        let mut state = self.state.lock().await;
        state.bills.insert(bill.id.clone(), bill);
        Ok(())
    }

    async fn get_bills_by_group(&self, group_id: &str) -> Result<Vec<Bill>, BillsplitError> {
        // For production: use a database query with an index on group_id
        let state = self.state.lock().await;
        let mut bills: Vec<Bill> = state
            .bills
            .values()
            .filter(|b| b.group_id == group_id)
            .cloned()
            .collect();
        bills.sort_by_key(|b| b.created_at);
        Ok(bills)
    }

    async fn get_unsettled_bills(&self, group_id: &str) -> Result<Vec<Bill>, BillsplitError> {
        let state = self.state.lock().await;
        let mut bills: Vec<Bill> = state
            .bills
            .values()
            .filter(|b| b.group_id == group_id && !b.settled)
            .cloned()
            .collect();
        bills.sort_by_key(|b| b.created_at);
        Ok(bills)
    }

    async fn commit_settlement(
        &self,
        group_id: &str,
        expected_bill_ids: &[String],
        invoice: Invoice,
        records: Vec<SettlementRecord>,
    ) -> Result<(), BillsplitError> {
        let mut state = self.state.lock().await;

        let mut expected: Vec<String> = expected_bill_ids.to_vec();
        expected.sort();
        if unsettled_ids(&state, group_id) != expected {
            return Err(BillsplitError::ConcurrentSettlement(group_id.to_string()));
        }

        state.records.insert(invoice.id.clone(), records);
        state.invoices.insert(invoice.id.clone(), invoice);
        for id in expected_bill_ids {
            if let Some(bill) = state.bills.get_mut(id) {
                bill.settled = true;
            }
        }
        Ok(())
    }

    async fn get_invoice(&self, invoice_id: &str) -> Result<Option<Invoice>, BillsplitError> {
        Ok(self.state.lock().await.invoices.get(invoice_id).cloned())
    }

    async fn get_records_by_invoice(
        &self,
        invoice_id: &str,
    ) -> Result<Vec<SettlementRecord>, BillsplitError> {
        Ok(self
            .state
            .lock()
            .await
            .records
            .get(invoice_id)
            .cloned()
            .unwrap_or_default())
    }
}
