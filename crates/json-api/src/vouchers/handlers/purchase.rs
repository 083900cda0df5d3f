//! Voucher Purchased Webhook

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use vouchers_app::domain::{users::UserId, vouchers::records::VoucherUuid};

use crate::{
    extensions::*,
    responses::ApiError,
    state::State,
    vouchers::{errors::LifecycleResultExt as _, models::PurchaseEnvelope},
};

/// Voucher Purchased Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PurchaseVoucherRequest {
    pub voucher_id: Uuid,
    pub buyer_id: i64,
}

/// Voucher Purchased Webhook
///
/// Records a voucher purchase and issues its redemption token.
#[endpoint(
    tags("webhooks"),
    summary = "Purchase Voucher",
    responses(
        (status_code = StatusCode::CREATED, description = "Voucher purchased"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Voucher not found"),
        (status_code = StatusCode::CONFLICT, description = "Voucher already purchased"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Storage timed out"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<PurchaseVoucherRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PurchaseEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let purchase = state
        .app
        .vouchers
        .purchase_voucher(
            VoucherUuid::from_uuid(request.voucher_id),
            UserId::new(request.buyer_id),
        )
        .await
        .observed("purchase")?;

    info!(
        purchase_uuid = %purchase.uuid,
        voucher_uuid = %purchase.voucher_uuid,
        buyer_id = %purchase.buyer_id,
        "voucher purchased"
    );

    res.status_code(StatusCode::CREATED);

    Ok(Json(PurchaseEnvelope {
        message: "Voucher purchased successfully".to_string(),
        data: purchase.into(),
    }))
}
