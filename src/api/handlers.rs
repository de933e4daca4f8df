use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::{
    api::models::*,
    api::openapi::ApiDoc,
    logger::in_memory::InMemoryLogging,
    models::{AppLog, Bill, Group, Transfer},
    resolver::MembershipResolver,
    service::{SettlementOutcome, SettlementService},
    storage::in_memory::InMemoryStorage,
};
use utoipa::OpenApi;

pub type AppService =
    SettlementService<InMemoryStorage, MembershipResolver<InMemoryStorage>, InMemoryLogging>;

// Define API routes
pub fn api_routes(service: Arc<AppService>) -> Router {
    Router::new()
        .route("/", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/groups", post(create_group))
        .route("/groups/{group_id}", get(get_group))
        .route("/groups/{group_id}/bills", post(record_bill).get(get_bills))
        .route(
            "/groups/{group_id}/settlement/preview",
            get(preview_settlement),
        )
        .route("/groups/{group_id}/settlement", post(settle_group))
        .route("/invoices/{invoice_id}", get(get_invoice))
        .route("/logs", get(get_app_logs))
        .with_state(service)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[utoipa::path(
    post,
    path = "/groups",
    request_body = CreateGroupRequest,
    responses(
        (status = 201, description = "Group created", body = Group),
        (status = 400, description = "No members or duplicate token", body = ErrorResponse)
    )
)]
pub async fn create_group(
    State(service): State<Arc<AppService>>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<Group>), ApiError> {
    let group = service.create_group(req.name, req.members).await?;
    Ok((StatusCode::CREATED, Json(group)))
}

#[utoipa::path(
    get,
    path = "/groups/{group_id}",
    params(("group_id" = String, Path, description = "Group ID")),
    responses(
        (status = 200, description = "Group retrieved", body = Group),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn get_group(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
) -> Result<Json<Group>, ApiError> {
    Ok(Json(service.get_group(&group_id).await?))
}

#[utoipa::path(
    post,
    path = "/groups/{group_id}/bills",
    params(("group_id" = String, Path, description = "Group ID")),
    request_body = RecordBillRequest,
    responses(
        (status = 201, description = "Bill recorded", body = Bill),
        (status = 400, description = "Malformed bill", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn record_bill(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
    Json(req): Json<RecordBillRequest>,
) -> Result<(StatusCode, Json<Bill>), ApiError> {
    let bill = service
        .record_bill(
            &group_id,
            req.items,
            req.tax_rate,
            req.service_rate,
            req.discount_rate,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(bill)))
}

#[utoipa::path(
    get,
    path = "/groups/{group_id}/bills",
    params(("group_id" = String, Path, description = "Group ID")),
    responses(
        (status = 200, description = "Bills for the group", body = [Bill]),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn get_bills(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<Bill>>, ApiError> {
    Ok(Json(service.get_bills(&group_id).await?))
}

#[utoipa::path(
    get,
    path = "/groups/{group_id}/settlement/preview",
    params(("group_id" = String, Path, description = "Group ID")),
    responses(
        (status = 200, description = "Transfers the next settlement would produce", body = [Transfer]),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn preview_settlement(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<Transfer>>, ApiError> {
    Ok(Json(service.preview_settlement(&group_id).await?))
}

#[utoipa::path(
    post,
    path = "/groups/{group_id}/settlement",
    params(("group_id" = String, Path, description = "Group ID")),
    responses(
        (status = 201, description = "Settlement written", body = SettlementOutcome),
        (status = 400, description = "No unsettled bills", body = ErrorResponse),
        (status = 409, description = "Concurrent settlement detected", body = ErrorResponse),
        (status = 422, description = "Unresolved participant token", body = ErrorResponse)
    )
)]
pub async fn settle_group(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
) -> Result<(StatusCode, Json<SettlementOutcome>), ApiError> {
    let outcome = service.settle_group(&group_id).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

#[utoipa::path(
    get,
    path = "/invoices/{invoice_id}",
    params(("invoice_id" = String, Path, description = "Invoice ID")),
    responses(
        (status = 200, description = "Invoice with its records", body = InvoiceResponse),
        (status = 404, description = "Invoice not found", body = ErrorResponse)
    )
)]
pub async fn get_invoice(
    State(service): State<Arc<AppService>>,
    Path(invoice_id): Path<String>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    let (invoice, records) = service.get_invoice(&invoice_id).await?;
    Ok(Json(InvoiceResponse { invoice, records }))
}

#[utoipa::path(
    get,
    path = "/logs",
    responses((status = 200, description = "Application audit log", body = [AppLog]))
)]
pub async fn get_app_logs(
    State(service): State<Arc<AppService>>,
) -> Result<Json<Vec<AppLog>>, ApiError> {
    Ok(Json(service.get_app_logs().await?))
}
