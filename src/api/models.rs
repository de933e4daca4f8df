use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::BillsplitError;
use crate::models::{Invoice, Item, Member, SettlementRecord};

// Request structs for JSON payloads
#[derive(Deserialize, ToSchema)]
pub struct CreateGroupRequest {
    pub name: String,
    pub members: Vec<Member>,
}

#[derive(Deserialize, ToSchema)]
pub struct RecordBillRequest {
    pub items: Vec<Item>,
    #[serde(default)]
    pub tax_rate: f64,
    #[serde(default)]
    pub service_rate: f64,
    #[serde(default)]
    pub discount_rate: f64,
}

#[derive(Serialize, ToSchema)]
pub struct InvoiceResponse {
    pub invoice: Invoice,
    pub records: Vec<SettlementRecord>,
}

// Error response struct
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub retryable: bool,
}

// Newtype wrapper for BillsplitError to implement IntoResponse
pub struct ApiError(pub BillsplitError);

impl From<BillsplitError> for ApiError {
    fn from(err: BillsplitError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            BillsplitError::GroupNotFound(_) | BillsplitError::InvoiceNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            BillsplitError::EmptyGroup
            | BillsplitError::DuplicateToken(_)
            | BillsplitError::EmptyBill
            | BillsplitError::ItemWithoutConsumers(_)
            | BillsplitError::NonPositiveAmount(_, _)
            | BillsplitError::InvalidRate(_, _)
            | BillsplitError::NoUnsettledBills(_) => StatusCode::BAD_REQUEST,
            BillsplitError::UnresolvedParticipant(_, _) => StatusCode::UNPROCESSABLE_ENTITY,
            BillsplitError::ConcurrentSettlement(_) => StatusCode::CONFLICT,
            BillsplitError::StorageError(_) | BillsplitError::LoggingError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ErrorResponse {
            error: self.0.to_string(),
            retryable: self.0.retryable(),
        };
        (status, Json(body)).into_response()
    }
}
