//! Settlement orchestration: loads a group's unsettled bills, reduces them
//! to transfers, resolves participant tokens to accounts and commits the
//! invoice, its records and the settled flags as one unit of work.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::balance::{accumulate, validate_bills};
use crate::constants::{
    BILL_RECORDED, GROUP_CREATED, SETTLEMENT_CREATED, SETTLEMENT_PREVIEWED,
};
use crate::error::BillsplitError;
use crate::logger::LoggingService;
use crate::matcher::{GreedyMatcher, SettlementStrategy};
use crate::models::{
    Bill, Group, Invoice, Item, Member, SettlementRecord, SettlementSummary, Transfer,
};
use crate::resolver::IdentityResolver;
use crate::rounding::round2;
use crate::storage::Storage;

/// Everything one settlement run produced.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SettlementOutcome {
    pub invoice: Invoice,
    pub records: Vec<SettlementRecord>,
    pub summary: SettlementSummary,
}

pub struct SettlementService<S: Storage, R: IdentityResolver, L: LoggingService> {
    storage: Arc<S>,
    resolver: R,
    logging: L,
    strategy: Box<dyn SettlementStrategy>,
}

impl<S: Storage, R: IdentityResolver, L: LoggingService> SettlementService<S, R, L> {
    pub fn new(storage: Arc<S>, resolver: R, logging: L) -> Self {
        info!("Initializing SettlementService with greedy matching");
        SettlementService {
            storage,
            resolver,
            logging,
            strategy: Box::new(GreedyMatcher),
        }
    }

    /// Swap the matching strategy (e.g. for an optimal solver).
    pub fn with_strategy(mut self, strategy: Box<dyn SettlementStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    // GROUPS

    pub async fn create_group(
        &self,
        name: String,
        members: Vec<Member>,
    ) -> Result<Group, BillsplitError> {
        if members.is_empty() {
            return Err(BillsplitError::EmptyGroup);
        }
        for (idx, member) in members.iter().enumerate() {
            if members[..idx].iter().any(|m| m.token == member.token) {
                return Err(BillsplitError::DuplicateToken(member.token.clone()));
            }
        }

        let group = Group {
            id: Uuid::new_v4().to_string(),
            name,
            members,
            created_at: Utc::now(),
        };
        self.storage.save_group(group.clone()).await?;
        info!("Created group {} ({})", group.id, group.name);

        self.logging
            .log_action(
                GROUP_CREATED,
                json!({ "group_id": group.id, "members": group.members.len() }),
                Some(&group.id),
            )
            .await?;

        Ok(group)
    }

    pub async fn get_group(&self, group_id: &str) -> Result<Group, BillsplitError> {
        self.storage
            .get_group(group_id)
            .await?
            .ok_or_else(|| BillsplitError::GroupNotFound(group_id.to_string()))
    }

    // BILLS

    pub async fn record_bill(
        &self,
        group_id: &str,
        items: Vec<Item>,
        tax_rate: f64,
        service_rate: f64,
        discount_rate: f64,
    ) -> Result<Bill, BillsplitError> {
        self.get_group(group_id).await?;

        for (name, rate) in [
            ("tax", tax_rate),
            ("service", service_rate),
            ("discount", discount_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                warn!("Rejecting bill for group {}: {} rate {}", group_id, name, rate);
                return Err(BillsplitError::InvalidRate(name, rate));
            }
        }

        let bill = Bill {
            id: Uuid::new_v4().to_string(),
            group_id: group_id.to_string(),
            items,
            tax_rate,
            service_rate,
            discount_rate,
            settled: false,
            created_at: Utc::now(),
        };
        validate_bills(std::slice::from_ref(&bill))?;

        self.storage.save_bill(bill.clone()).await?;
        debug!("Recorded bill {} for group {}", bill.id, group_id);

        self.logging
            .log_action(
                BILL_RECORDED,
                json!({ "bill_id": bill.id, "items": bill.items.len() }),
                Some(group_id),
            )
            .await?;

        Ok(bill)
    }

    pub async fn get_bills(&self, group_id: &str) -> Result<Vec<Bill>, BillsplitError> {
        self.get_group(group_id).await?;
        self.storage.get_bills_by_group(group_id).await
    }

    // SETTLEMENT

    /// Dry run: what the next settlement would transfer. No writes; an empty
    /// unsettled set yields an empty list rather than an error.
    pub async fn preview_settlement(
        &self,
        group_id: &str,
    ) -> Result<Vec<Transfer>, BillsplitError> {
        self.get_group(group_id).await?;
        let bills = self.storage.get_unsettled_bills(group_id).await?;
        let balances = accumulate(&bills)?;
        let transfers = self.strategy.match_transfers(&balances);

        self.logging
            .log_action(
                SETTLEMENT_PREVIEWED,
                json!({ "bills": bills.len(), "transfers": transfers.len() }),
                Some(group_id),
            )
            .await?;

        Ok(transfers)
    }

    /// Run one settlement over the group's unsettled bills.
    ///
    /// Fails whole or not at all: a resolution miss or a concurrent run
    /// leaves every bill unsettled and writes nothing. The commit itself is
    /// delegated to `Storage::commit_settlement`, whose contract ties the
    /// settled-flag flips to the invoice write.
    pub async fn settle_group(
        &self,
        group_id: &str,
    ) -> Result<SettlementOutcome, BillsplitError> {
        self.get_group(group_id).await?;

        let bills = self.storage.get_unsettled_bills(group_id).await?;
        if bills.is_empty() {
            debug!("Settlement requested for group {} with nothing to settle", group_id);
            return Err(BillsplitError::NoUnsettledBills(group_id.to_string()));
        }

        let balances = accumulate(&bills)?;
        let transfers = self.strategy.match_transfers(&balances);
        let accounts = self.resolve_participants(group_id, &transfers).await?;

        let mut date_start = bills[0].created_at;
        let mut date_end = bills[0].created_at;
        for bill in &bills[1..] {
            date_start = date_start.min(bill.created_at);
            date_end = date_end.max(bill.created_at);
        }

        let invoice = Invoice {
            id: Uuid::new_v4().to_string(),
            group_id: group_id.to_string(),
            date_start,
            date_end,
        };
        let records: Vec<SettlementRecord> = transfers
            .iter()
            .map(|t| SettlementRecord {
                id: Uuid::new_v4().to_string(),
                invoice_id: invoice.id.clone(),
                debtor: accounts[&t.from].clone(),
                creditor: accounts[&t.to].clone(),
                amount: t.amount,
                already_paid: false,
            })
            .collect();

        let bill_ids: Vec<String> = bills.iter().map(|b| b.id.clone()).collect();
        self.storage
            .commit_settlement(group_id, &bill_ids, invoice.clone(), records.clone())
            .await?;

        let total_amount = round2(transfers.iter().map(|t| t.amount).sum());
        let summary = SettlementSummary {
            group_id: group_id.to_string(),
            total_bills_settled: bills.len(),
            total_amount,
            transfers,
            created_at: Utc::now(),
        };
        info!(
            "Settled group {}: {} bills, {} transfers, invoice {}",
            group_id,
            summary.total_bills_settled,
            summary.transfers.len(),
            invoice.id
        );

        self.logging
            .log_action(
                SETTLEMENT_CREATED,
                json!({
                    "invoice_id": invoice.id,
                    "bills": summary.total_bills_settled,
                    "transfers": summary.transfers.len(),
                    "total_amount": total_amount,
                }),
                Some(group_id),
            )
            .await?;

        Ok(SettlementOutcome {
            invoice,
            records,
            summary,
        })
    }

    pub async fn get_invoice(
        &self,
        invoice_id: &str,
    ) -> Result<(Invoice, Vec<SettlementRecord>), BillsplitError> {
        let invoice = self
            .storage
            .get_invoice(invoice_id)
            .await?
            .ok_or_else(|| BillsplitError::InvoiceNotFound(invoice_id.to_string()))?;
        let records = self.storage.get_records_by_invoice(invoice_id).await?;
        Ok((invoice, records))
    }

    pub async fn get_app_logs(&self) -> Result<Vec<crate::models::AppLog>, BillsplitError> {
        self.logging.get_logs().await
    }

    /// Map every token referenced by the transfers to its account id. Any
    /// unresolved token aborts before a single write happens.
    async fn resolve_participants(
        &self,
        group_id: &str,
        transfers: &[Transfer],
    ) -> Result<HashMap<String, String>, BillsplitError> {
        let mut accounts = HashMap::new();
        for transfer in transfers {
            for token in [&transfer.from, &transfer.to] {
                if accounts.contains_key(token.as_str()) {
                    continue;
                }
                match self.resolver.resolve(group_id, token).await? {
                    Some(account_id) => {
                        accounts.insert(token.clone(), account_id);
                    }
                    None => {
                        warn!("Unresolved participant {} in group {}", token, group_id);
                        return Err(BillsplitError::UnresolvedParticipant(
                            group_id.to_string(),
                            token.clone(),
                        ));
                    }
                }
            }
        }
        Ok(accounts)
    }
}
