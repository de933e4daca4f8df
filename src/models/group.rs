use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Membership record: the participant token used inside bills, and the
/// durable account it resolves to when settlements are persisted.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Member {
    pub account_id: String,
    pub token: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub members: Vec<Member>,
    pub created_at: DateTime<Utc>,
}

impl Group {
    pub fn member_by_token(&self, token: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.token == token)
    }
}
