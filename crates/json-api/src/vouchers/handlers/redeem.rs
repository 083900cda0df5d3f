//! Voucher Redeemed Webhook

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use vouchers_app::tokens::RedemptionToken;

use crate::{
    extensions::*,
    responses::ApiError,
    state::State,
    vouchers::{errors::LifecycleResultExt as _, models::MessageEnvelope},
};

/// Voucher Redeemed Request
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct RedeemVoucherRequest {
    /// Token issued when the voucher was purchased
    pub redemption_token: String,

    /// RFC 3339 redemption time, defaults to now
    #[serde(default)]
    pub redeemed_at: Option<String>,
}

/// Voucher Redeemed Webhook
///
/// Marks the purchase holding the token as redeemed.
#[endpoint(
    tags("webhooks"),
    summary = "Redeem Voucher",
    responses(
        (status_code = StatusCode::OK, description = "Voucher redeemed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown redemption token"),
        (status_code = StatusCode::CONFLICT, description = "Voucher already redeemed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Storage timed out"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RedeemVoucherRequest>,
    depot: &mut Depot,
) -> Result<Json<MessageEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();
    let redeemed_at = request.redeemed_at.into_timestamp_or_now("redeemed_at")?;

    state
        .app
        .vouchers
        .redeem_voucher(RedemptionToken::from(request.redemption_token), redeemed_at)
        .await
        .observed("redeem")?;

    info!(%redeemed_at, "voucher redeemed");

    Ok(Json(MessageEnvelope {
        message: "Voucher redeemed successfully".to_string(),
    }))
}
