//! List Owned Vouchers Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use vouchers_app::domain::users::UserId;

use crate::{
    extensions::*,
    responses::ApiError,
    state::State,
    vouchers::{
        errors::LifecycleResultExt as _,
        models::{OwnedVouchersEnvelope, VoucherResponse},
    },
};

/// List Owned Vouchers Handler
///
/// Returns the vouchers issued by a listing owner, newest first.
#[endpoint(
    tags("vouchers"),
    summary = "List Issued Vouchers",
    responses(
        (status_code = StatusCode::OK, description = "Issued vouchers"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Storage timed out"),
    ),
)]
pub(crate) async fn handler(
    user_id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<OwnedVouchersEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let data = state
        .app
        .vouchers
        .list_listing_owner_vouchers(UserId::new(user_id.into_inner()))
        .await
        .observed("list_owned_vouchers")?
        .into_iter()
        .map(VoucherResponse::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(OwnedVouchersEnvelope {
        message: "Owned vouchers retrieved successfully".to_string(),
        data,
    }))
}
