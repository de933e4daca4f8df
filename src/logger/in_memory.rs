use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::BillsplitError;
use crate::logger::LoggingService;
use crate::models::AppLog;

pub struct InMemoryLogging {
    logs: Mutex<Vec<AppLog>>,
}

impl InMemoryLogging {
    pub fn new() -> Self {
        InMemoryLogging {
            logs: Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryLogging {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LoggingService for InMemoryLogging {
    async fn log_action(
        &self,
        action: &str,
        details: serde_json::Value,
        group_id: Option<&str>,
    ) -> Result<(), BillsplitError> {
        // For production: use a logging queue or batch writes
        let mut logs = self.logs.lock().await;
        logs.push(AppLog {
            id: Uuid::new_v4().to_string(),
            action: action.to_string(),
            group_id: group_id.map(String::from),
            details: serde_json::from_value(details).unwrap_or_default(),
            timestamp: Utc::now(),
        });
        Ok(())
    }

    async fn get_logs(&self) -> Result<Vec<AppLog>, BillsplitError> {
        Ok(self.logs.lock().await.clone())
    }
}
