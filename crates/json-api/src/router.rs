//! App Router

use salvo::Router;

use crate::{healthcheck, observability, vouchers};

/// Webhook and listing routes.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("health").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(
            Router::with_path("webhook")
                .push(Router::with_path("voucher-created").post(vouchers::create::handler))
                .push(Router::with_path("voucher-purchased").post(vouchers::purchase::handler))
                .push(Router::with_path("voucher-redeemed").post(vouchers::redeem::handler)),
        )
        .push(
            Router::with_path("vouchers/{user_id}")
                .get(vouchers::user_vouchers::handler)
                .push(Router::with_path("owned").get(vouchers::owned::handler)),
        )
}
