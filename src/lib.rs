pub mod api;
pub mod balance;
pub mod config;
pub mod constants;
pub mod error;
pub mod logger;
pub mod matcher;
pub mod models;
pub mod resolver;
pub mod rounding;
pub mod service;
pub mod storage;

pub use balance::{accumulate, NetBalance};
pub use error::BillsplitError;
pub use logger::in_memory::InMemoryLogging;
pub use matcher::{GreedyMatcher, SettlementStrategy};
pub use resolver::{IdentityResolver, MembershipResolver};
pub use rounding::round2;
pub use service::{SettlementOutcome, SettlementService};
pub use storage::in_memory::InMemoryStorage;

#[cfg(test)]
mod tests;
