//! Participant token resolution. Bills reference people by opaque tokens;
//! persisted settlement records reference durable accounts. The mapping
//! lives in the group's membership records.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::BillsplitError;
use crate::storage::Storage;

#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Map a participant token to a durable account id, `None` if the token
    /// is not a member of the group.
    async fn resolve(
        &self,
        group_id: &str,
        token: &str,
    ) -> Result<Option<String>, BillsplitError>;
}

/// Resolver backed by group membership records.
pub struct MembershipResolver<S: Storage> {
    storage: Arc<S>,
}

impl<S: Storage> MembershipResolver<S> {
    pub fn new(storage: Arc<S>) -> Self {
        MembershipResolver { storage }
    }
}

#[async_trait]
impl<S: Storage> IdentityResolver for MembershipResolver<S> {
    async fn resolve(
        &self,
        group_id: &str,
        token: &str,
    ) -> Result<Option<String>, BillsplitError> {
        let group = self
            .storage
            .get_group(group_id)
            .await?
            .ok_or_else(|| BillsplitError::GroupNotFound(group_id.to_string()))?;
        Ok(group
            .member_by_token(token)
            .map(|m| m.account_id.clone()))
    }
}
