//! Prometheus metrics collection and exposition endpoint.

use std::sync::OnceLock;

use prometheus::{
    Encoder as _, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use salvo::{
    Response, handler,
    http::{StatusCode, header::CONTENT_TYPE},
};
use tracing::error;

#[derive(Debug)]
struct ServiceMetrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    lifecycle_operations_total: IntCounterVec,
}

static SERVICE_METRICS: OnceLock<Option<ServiceMetrics>> = OnceLock::new();

#[derive(Debug)]
pub(super) struct InFlightRequestGuard {
    tracked: bool,
}

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        if let Some(metrics) = metrics() {
            metrics.requests_in_flight.inc();
            return Self { tracked: true };
        }

        Self { tracked: false }
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if self.tracked
            && let Some(metrics) = metrics()
        {
            metrics.requests_in_flight.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let status_class = status_class(status_code);
    let status_code = status_code.to_string();

    metrics
        .requests_total
        .with_label_values(&[method, route, status_class, status_code.as_str()])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

/// Count one voucher lifecycle operation (`create`, `purchase`, `redeem`, ...)
/// by outcome (`success` or an error kind).
pub(crate) fn observe_lifecycle(operation: &str, outcome: &str) {
    let Some(metrics) = metrics() else {
        return;
    };

    metrics
        .lifecycle_operations_total
        .with_label_values(&[operation, outcome])
        .inc();
}

/// Prometheus text exposition of every service metric.
#[handler]
pub(crate) async fn metrics_handler(res: &mut Response) {
    let encoded = metrics()
        .ok_or(prometheus::Error::Msg("metrics registry unavailable".to_string()))
        .and_then(ServiceMetrics::encode);

    match encoded {
        Ok(body) => {
            if let Err(source) = res.add_header(CONTENT_TYPE, TextEncoder::new().format_type(), true) {
                error!("failed to set metrics content type header: {source}");
            }

            res.render(body);
        }
        Err(source) => {
            error!("failed to encode metrics response: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}

fn metrics() -> Option<&'static ServiceMetrics> {
    SERVICE_METRICS
        .get_or_init(|| {
            ServiceMetrics::register()
                .inspect_err(|source| error!("failed to register service metrics: {source}"))
                .ok()
        })
        .as_ref()
}

impl ServiceMetrics {
    fn encode(&self) -> Result<String, prometheus::Error> {
        let mut body = String::new();

        TextEncoder::new().encode_utf8(&self.registry.gather(), &mut body)?;

        Ok(body)
    }

    fn register() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new(
                "vouchers_json_http_requests_total",
                "HTTP requests by method, route, status class and status code.",
            ),
            &["method", "route", "status_class", "status_code"],
        )?;

        let request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "vouchers_json_http_request_duration_seconds",
                "HTTP request latency by method and route.",
            )
            .buckets(prometheus::exponential_buckets(0.001, 2.5, 12)?),
            &["method", "route"],
        )?;

        let requests_in_flight = IntGauge::with_opts(Opts::new(
            "vouchers_json_http_requests_in_flight",
            "HTTP requests currently being served.",
        ))?;

        let lifecycle_operations_total = IntCounterVec::new(
            Opts::new(
                "vouchers_json_lifecycle_operations_total",
                "Voucher lifecycle operations by operation and outcome.",
            ),
            &["operation", "outcome"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(request_duration_seconds.clone()))?;
        registry.register(Box::new(requests_in_flight.clone()))?;
        registry.register(Box::new(lifecycle_operations_total.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            request_duration_seconds,
            requests_in_flight,
            lifecycle_operations_total,
        })
    }
}

fn status_class(status_code: u16) -> &'static str {
    match status_code {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}
