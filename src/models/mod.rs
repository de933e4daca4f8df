pub mod audit;
pub mod bill;
pub mod group;
pub mod invoice;
pub mod transfer;

pub use audit::AppLog;
pub use bill::{Bill, Item};
pub use group::{Group, Member};
pub use invoice::{Invoice, SettlementRecord};
pub use transfer::{SettlementSummary, Transfer};
