use async_trait::async_trait;

use crate::error::BillsplitError;
use crate::models::AppLog;

#[async_trait]
pub trait LoggingService: Send + Sync {
    async fn log_action(
        &self,
        action: &str,
        details: serde_json::Value,
        group_id: Option<&str>,
    ) -> Result<(), BillsplitError>;

    async fn get_logs(&self) -> Result<Vec<AppLog>, BillsplitError>;
}

pub mod in_memory;
