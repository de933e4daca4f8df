use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Serialize)]
pub enum BillsplitError {
    /// Group with given ID not found
    #[error("Group {0} not found")]
    GroupNotFound(String),

    /// Group must be created with at least one member
    #[error("Group has no members")]
    EmptyGroup,

    /// Participant token appears more than once in a group's membership
    #[error("Duplicate participant token {0} in group")]
    DuplicateToken(String),

    /// Bill was submitted with no items
    #[error("Bill has no items")]
    EmptyBill,

    /// An item has an empty consumer list
    #[error("Item `{0}` has no consumers")]
    ItemWithoutConsumers(String),

    /// An item amount is zero or negative
    #[error("Item `{0}` has non-positive amount {1}")]
    NonPositiveAmount(String, f64),

    /// A bill rate (tax, service, discount) is outside [0, 1]
    #[error("Invalid {0} rate: {1}")]
    InvalidRate(&'static str, f64),

    /// Settlement requested but every bill in the group is already settled
    #[error("No unsettled bills for group {0}")]
    NoUnsettledBills(String),

    /// A participant token in the computed transfers has no account mapping
    #[error("Participant {1} in group {0} has no account")]
    UnresolvedParticipant(String, String),

    /// The unsettled bill set changed between selection and commit
    #[error("Concurrent settlement detected for group {0}")]
    ConcurrentSettlement(String),

    /// Invoice with given ID not found
    #[error("Invoice {0} not found")]
    InvoiceNotFound(String),

    /// Storage operation failed
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Audit logging failed
    #[error("Logging error: {0}")]
    LoggingError(String),
}

impl BillsplitError {
    /// Whether a caller may retry the same request unchanged. Input and
    /// resolution failures need corrected input first; a conflicting or
    /// failed commit left no partial state behind and can simply be rerun.
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            BillsplitError::ConcurrentSettlement(_)
                | BillsplitError::StorageError(_)
                | BillsplitError::LoggingError(_)
        )
    }
}
