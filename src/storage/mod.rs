use async_trait::async_trait;

use crate::error::BillsplitError;
use crate::models::{Bill, Group, Invoice, SettlementRecord};

#[async_trait]
pub trait Storage: Send + Sync {
    async fn save_group(&self, group: Group) -> Result<(), BillsplitError>;
    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, BillsplitError>;

    async fn save_bill(&self, bill: Bill) -> Result<(), BillsplitError>;
    async fn get_bills_by_group(&self, group_id: &str) -> Result<Vec<Bill>, BillsplitError>;
    async fn get_unsettled_bills(&self, group_id: &str) -> Result<Vec<Bill>, BillsplitError>;

    /// Write one settlement as a single unit of work: verify the group's
    /// unsettled bill set is still exactly `expected_bill_ids` (otherwise
    /// `ConcurrentSettlement`), insert the invoice and its records, and flip
    /// `settled` on those bills. Either everything lands or nothing does;
    /// bills must never be marked settled without their invoice, nor the
    /// other way around.
    async fn commit_settlement(
        &self,
        group_id: &str,
        expected_bill_ids: &[String],
        invoice: Invoice,
        records: Vec<SettlementRecord>,
    ) -> Result<(), BillsplitError>;

    async fn get_invoice(&self, invoice_id: &str) -> Result<Option<Invoice>, BillsplitError>;
    async fn get_records_by_invoice(
        &self,
        invoice_id: &str,
    ) -> Result<Vec<SettlementRecord>, BillsplitError>;
}

pub mod in_memory;
