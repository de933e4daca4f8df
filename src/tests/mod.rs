
use std::sync::Arc;

use crate::logger::in_memory::InMemoryLogging;
use crate::models::{Item, Member};
use crate::resolver::MembershipResolver;
use crate::service::SettlementService;
use crate::storage::in_memory::InMemoryStorage;

pub type TestService =
    SettlementService<InMemoryStorage, MembershipResolver<InMemoryStorage>, InMemoryLogging>;

pub fn create_test_service() -> (TestService, Arc<InMemoryStorage>) {
    let _ = env_logger::builder().is_test(true).try_init();
    let storage = Arc::new(InMemoryStorage::new());
    let resolver = MembershipResolver::new(storage.clone());
    let logging = InMemoryLogging::new();
    (
        SettlementService::new(storage.clone(), resolver, logging),
        storage,
    )
}

pub fn members(tokens: &[&str]) -> Vec<Member> {
    tokens
        .iter()
        .map(|t| Member {
            account_id: format!("acct-{}", t.to_lowercase()),
            token: t.to_string(),
        })
        .collect()
}

pub fn item(amount: f64, consumers: &[&str], payer: &str) -> Item {
    Item {
        name: "item".to_string(),
        amount,
        consumers: consumers.iter().map(|s| s.to_string()).collect(),
        payer: payer.to_string(),
    }
}
