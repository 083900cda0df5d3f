//! Request-level logging, request IDs, and parent trace extraction.

mod parent_context;
mod request_ids;
mod spans;

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, Span, error, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use super::{metrics, settings};

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Paths polled by scrapers and load balancers are passed through untraced.
const UNTRACED_PATHS: [&str; 2] = ["/metrics", "/health"];

/// What the completion log needs to know about a request.
struct RequestSummary<'a> {
    request_id: &'a str,
    method: &'a str,
    path: &'a str,
    route: &'a str,
}

impl RequestSummary<'_> {
    fn span(&self, span_name: &str, remote_addr: &str) -> Span {
        tracing::info_span!(
            parent: None,
            "http.request",
            otel.name = %span_name,
            otel.kind = "server",
            request_id = %self.request_id,
            method = %self.method,
            path = %self.path,
            remote_addr = %remote_addr,
            status = tracing::field::Empty,
            duration_ms = tracing::field::Empty
        )
    }

    fn complete(&self, span: &Span, status: StatusCode, duration: Duration) {
        let status_code = status.as_u16();
        let duration_ms = duration.as_millis();
        let threshold_ms = u128::from(settings::slow_request_threshold_ms());

        metrics::observe_request(self.method, self.route, status_code, duration.as_secs_f64());

        span.record("status", status_code);
        span.record("duration_ms", duration_ms);

        let _entered = span.enter();

        info!(status = status_code, duration_ms, "request.completed");

        if status.is_server_error() {
            error!(status = status_code, method = %self.method, path = %self.path, request_id = %self.request_id, "server error response");
        } else if status.is_client_error() {
            warn!(status = status_code, method = %self.method, path = %self.path, request_id = %self.request_id, "client error response");
        }

        if duration_ms > threshold_ms {
            warn!(method = %self.method, path = %self.path, request_id = %self.request_id, duration_ms, threshold_ms, "slow request detected");
        }
    }
}

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if UNTRACED_PATHS.contains(&req.uri().path()) {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();
    let _in_flight_request = metrics::InFlightRequestGuard::track();

    let request_id =
        request_ids::resolve_request_id(req.header::<String>(request_ids::REQUEST_ID_HEADER));

    depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());
    request_ids::set_request_id_header(res, &request_id);

    let method = req.method().to_string();
    let path = req.uri().path().to_owned();
    let names = spans::request_span_name(&method, &path);

    let summary = RequestSummary {
        request_id: &request_id,
        method: &method,
        path: &path,
        route: &names.otel_path,
    };

    let span = summary.span(&names.otel_span_name, &req.remote_addr().to_string());

    if settings::otel_parent_propagation_enabled()
        && let Some(parent_context) = parent_context::extract_parent_context(req.headers())
        && let Err(source) = span.set_parent(parent_context)
    {
        warn!("failed to set parent context on request span: {source}");
    }

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    summary.complete(
        &span,
        request_ids::response_status_or_ok(res.status_code),
        started.elapsed(),
    );
}
