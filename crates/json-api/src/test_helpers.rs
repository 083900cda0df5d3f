//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use vouchers_app::{context::AppContext, domain::lifecycle::MockVouchersService};

use crate::{responses, state::State};

pub(crate) use crate::vouchers::handlers::{
    TEST_TOKEN, make_purchase, make_view, make_voucher,
};

pub(crate) fn state_with_vouchers(vouchers: MockVouchersService) -> Arc<State> {
    State::from_app_context(AppContext {
        vouchers: Arc::new(vouchers),
    })
}

pub(crate) fn vouchers_service(vouchers: MockVouchersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_vouchers(vouchers)))
            .push(route),
    )
    .catcher(responses::catcher())
}
