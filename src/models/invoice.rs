use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The settlement envelope: written once per settlement run, spanning the
/// earliest and latest `created_at` of the bills it consumed. Immutable.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Invoice {
    pub id: String,
    pub group_id: String,
    pub date_start: DateTime<Utc>,
    pub date_end: DateTime<Utc>,
}

/// One persisted transfer under an invoice. Debtor and creditor are durable
/// account ids, not participant tokens.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SettlementRecord {
    pub id: String,
    pub invoice_id: String,
    pub debtor: String,
    pub creditor: String,
    pub amount: f64,
    pub already_paid: bool,
}
