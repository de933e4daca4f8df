use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A directed pairwise payment instruction, in participant tokens. Amount is
/// strictly positive and above the materiality floor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Transfer {
    pub from: String,
    pub to: String,
    pub amount: f64,
}

/// API-facing summary of one settlement run.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SettlementSummary {
    pub group_id: String,
    pub total_bills_settled: usize,
    pub total_amount: f64,
    pub transfers: Vec<Transfer>,
    pub created_at: DateTime<Utc>,
}
