//! List User Vouchers Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;

use vouchers_app::domain::users::UserId;

use crate::{
    extensions::*,
    responses::ApiError,
    state::State,
    vouchers::{
        errors::LifecycleResultExt as _,
        models::{UserVoucherResponse, UserVouchersEnvelope},
    },
};

/// List User Vouchers Handler
///
/// Returns the vouchers a buyer has purchased, newest first. Redemption
/// tokens are only included for purchases that are still active.
#[endpoint(
    tags("vouchers"),
    summary = "List Purchased Vouchers",
    responses(
        (status_code = StatusCode::OK, description = "Purchased vouchers"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Storage timed out"),
    ),
)]
pub(crate) async fn handler(
    user_id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<UserVouchersEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let buyer = UserId::new(user_id.into_inner());

    let views = state
        .app
        .vouchers
        .list_user_vouchers(buyer)
        .await
        .observed("list_user_vouchers")?;

    info!(user_id = %buyer, voucher_count = views.len(), "user vouchers retrieved");

    let data = views
        .into_iter()
        .map(UserVoucherResponse::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(UserVouchersEnvelope {
        message: "User vouchers retrieved successfully".to_string(),
        data,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use vouchers_app::domain::{
        lifecycle::{MockVouchersService, VouchersServiceError},
        purchases::records::PurchaseStatus,
    };

    use crate::{
        responses::ErrorEnvelope,
        test_helpers::{TEST_TOKEN, make_view, vouchers_service},
    };

    use super::*;

    fn make_service(vouchers: MockVouchersService) -> Service {
        vouchers_service(vouchers, Router::with_path("vouchers/{user_id}").get(handler))
    }

    #[tokio::test]
    async fn test_list_returns_tokens_only_for_active_purchases() -> TestResult {
        let mut vouchers = MockVouchersService::new();

        vouchers
            .expect_list_user_vouchers()
            .once()
            .withf(|buyer| *buyer == UserId::new(7))
            .return_once(|_| {
                Ok(vec![
                    make_view(PurchaseStatus::Active),
                    make_view(PurchaseStatus::Redeemed),
                ])
            });

        let mut res = TestClient::get("http://example.com/vouchers/7")
            .send(&make_service(vouchers))
            .await;

        let body: UserVouchersEnvelope = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.message, "User vouchers retrieved successfully");
        assert_eq!(body.data.len(), 2);
        assert_eq!(body.data[0].status, "active");
        assert_eq!(body.data[0].redemption_token.as_deref(), Some(TEST_TOKEN));
        assert_eq!(body.data[1].status, "redeemed");
        assert_eq!(body.data[1].redemption_token, None);
        assert!(body.data[1].redeemed_at.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn test_redeemed_purchase_omits_token_field() -> TestResult {
        let mut vouchers = MockVouchersService::new();

        vouchers
            .expect_list_user_vouchers()
            .once()
            .return_once(|_| Ok(vec![make_view(PurchaseStatus::Redeemed)]));

        let mut res = TestClient::get("http://example.com/vouchers/7")
            .send(&make_service(vouchers))
            .await;

        let body: serde_json::Value = res.take_json().await?;

        assert!(body["data"][0].get("redemption_token").is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_list_empty_returns_empty_array() -> TestResult {
        let mut vouchers = MockVouchersService::new();

        vouchers
            .expect_list_user_vouchers()
            .once()
            .return_once(|_| Ok(Vec::new()));

        let mut res = TestClient::get("http://example.com/vouchers/42")
            .send(&make_service(vouchers))
            .await;

        let body: UserVouchersEnvelope = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.data.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_non_numeric_user_id_returns_400() -> TestResult {
        let mut vouchers = MockVouchersService::new();

        vouchers.expect_list_user_vouchers().never();

        let mut res = TestClient::get("http://example.com/vouchers/abc")
            .send(&make_service(vouchers))
            .await;

        let body: ErrorEnvelope = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.code, 400);

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_user_id_returns_400() -> TestResult {
        let mut vouchers = MockVouchersService::new();

        vouchers
            .expect_list_user_vouchers()
            .once()
            .return_once(|_| {
                Err(VouchersServiceError::Invalid {
                    field: "user_id",
                    reason: "must be positive",
                })
            });

        let res = TestClient::get("http://example.com/vouchers/0")
            .send(&make_service(vouchers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
