//! Voucher Created Webhook

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use vouchers_app::domain::{
    users::{ListingId, UserId},
    vouchers::data::VoucherDraft,
};

use crate::{
    extensions::*,
    responses::ApiError,
    state::State,
    vouchers::{
        errors::LifecycleResultExt as _,
        models::{VoucherEnvelope, price_from_f64},
    },
};

/// Voucher Created Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateVoucherRequest {
    /// Marketplace listing the voucher is attached to
    pub adv_id: i64,

    /// Listing owner
    pub user_id: i64,

    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    pub price: f64,

    /// Photo URL
    #[serde(default)]
    pub photo: Option<String>,
}

impl CreateVoucherRequest {
    fn into_draft(self) -> Result<VoucherDraft, ApiError> {
        Ok(VoucherDraft {
            listing_id: ListingId::new(self.adv_id),
            user_id: UserId::new(self.user_id),
            price: price_from_f64(self.price)?,
            title: self.title,
            description: self.description,
            photo_url: self.photo,
        })
    }
}

/// Voucher Created Webhook
///
/// Issues a new voucher for a marketplace listing.
#[endpoint(
    tags("webhooks"),
    summary = "Create Voucher",
    responses(
        (status_code = StatusCode::CREATED, description = "Voucher created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Storage timed out"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateVoucherRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<VoucherEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let draft = json.into_inner().into_draft()?;

    let voucher = state
        .app
        .vouchers
        .create_voucher(draft)
        .await
        .observed("create")?;

    info!(voucher_uuid = %voucher.uuid, user_id = %voucher.user_id, "voucher created");

    res.add_header(LOCATION, format!("/vouchers/{}/owned", voucher.user_id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(VoucherEnvelope {
        message: "Voucher created successfully".to_string(),
        data: voucher.try_into()?,
    }))
}
