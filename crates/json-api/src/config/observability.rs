//! Observability & Logging Config

use std::time::Duration;

use clap::Args;

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Single-line logs for terminals.
    Compact,

    /// One JSON object per event, for log shippers.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Default level or filter directives, e.g. `info` or `vouchers_app=debug`
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Trace export and request diagnostics.
#[derive(Debug, Args)]
pub struct ObservabilityConfig {
    /// Export spans over OTLP.
    #[arg(long, env = "OTEL_ENABLED", default_value_t = false, action = clap::ArgAction::Set)]
    pub otel_enabled: bool,

    /// Continue traces from incoming `traceparent` headers (needs `OTEL_ENABLED`).
    #[arg(
        long,
        env = "OTEL_PARENT_PROPAGATION_ENABLED",
        default_value_t = false,
        action = clap::ArgAction::Set
    )]
    pub otel_parent_propagation_enabled: bool,

    /// OTLP gRPC collector endpoint.
    #[arg(
        long,
        env = "OTEL_EXPORTER_OTLP_ENDPOINT",
        default_value = "http://localhost:4317"
    )]
    pub otel_exporter_otlp_endpoint: String,

    /// OTLP export timeout in seconds.
    #[arg(
        long,
        env = "OTEL_EXPORTER_OTLP_TIMEOUT_SECONDS",
        default_value_t = 3u64
    )]
    pub otel_exporter_otlp_timeout_seconds: u64,

    /// `service.name` resource attribute.
    #[arg(long, env = "OTEL_SERVICE_NAME", default_value = "vouchers-json")]
    pub otel_service_name: String,

    /// `service.version` resource attribute.
    #[arg(
        long,
        env = "OTEL_SERVICE_VERSION",
        default_value = env!("CARGO_PKG_VERSION")
    )]
    pub otel_service_version: String,

    /// `deployment.environment.name` resource attribute.
    #[arg(
        long,
        env = "OTEL_DEPLOYMENT_ENVIRONMENT",
        default_value = "development"
    )]
    pub otel_deployment_environment: String,

    /// Fraction of root traces to sample.
    #[arg(long, env = "OTEL_TRACE_SAMPLE_RATIO", default_value_t = 1.0_f64)]
    pub otel_trace_sample_ratio: f64,

    /// Requests slower than this are logged at warn level.
    #[arg(long, env = "SLOW_REQUEST_THRESHOLD_MS", default_value_t = 1_000_u64)]
    pub slow_request_threshold_ms: u64,
}

impl ObservabilityConfig {
    /// Parent extraction needs the propagator, which only exists with export on.
    #[must_use]
    pub fn parent_propagation(&self) -> bool {
        self.otel_enabled && self.otel_parent_propagation_enabled
    }

    /// Sample ratio clamped into `[0.0, 1.0]`; NaN samples everything.
    #[must_use]
    pub fn sample_ratio(&self) -> f64 {
        if self.otel_trace_sample_ratio.is_nan() {
            return 1.0;
        }

        self.otel_trace_sample_ratio.clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn exporter_timeout(&self) -> Duration {
        Duration::from_secs(self.otel_exporter_otlp_timeout_seconds)
    }
}
