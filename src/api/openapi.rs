use utoipa::OpenApi;

use crate::{
    api::models::{CreateGroupRequest, ErrorResponse, InvoiceResponse, RecordBillRequest},
    models::{AppLog, Bill, Group, Invoice, Item, Member, SettlementRecord, SettlementSummary, Transfer},
    service::SettlementOutcome,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::create_group,
        super::handlers::get_group,
        super::handlers::record_bill,
        super::handlers::get_bills,
        super::handlers::preview_settlement,
        super::handlers::settle_group,
        super::handlers::get_invoice,
        super::handlers::get_app_logs
    ),
    components(schemas(
        CreateGroupRequest,
        RecordBillRequest,
        InvoiceResponse,
        ErrorResponse,
        Group,
        Member,
        Bill,
        Item,
        Invoice,
        SettlementRecord,
        Transfer,
        SettlementSummary,
        SettlementOutcome,
        AppLog
    )),
    info(
        title = "Billsplit API",
        description = "API for recording group bills and writing settlements",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
