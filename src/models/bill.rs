use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single charge inside a bill. `payer` fronted the amount; the cost is
/// split equally across `consumers`. Both sides are participant tokens,
/// opaque strings unique within the group, resolved to accounts only when a
/// settlement is written.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Item {
    pub name: String,
    pub amount: f64,
    pub consumers: Vec<String>,
    pub payer: String,
}

/// One recorded expense event. Tax, service and discount rates apply
/// uniformly to every item. `settled` is flipped exactly once, by the
/// settlement commit; a bill never belongs to more than one invoice.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Bill {
    pub id: String,
    pub group_id: String,
    pub items: Vec<Item>,
    pub tax_rate: f64,
    pub service_rate: f64,
    pub discount_rate: f64,
    pub settled: bool,
    pub created_at: DateTime<Utc>,
}
