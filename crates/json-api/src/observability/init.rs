//! Tracing subscriber and telemetry lifecycle management.

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace::SdkTracerProvider};
use tracing::{error, info};

use crate::config::ServerConfig;

use super::{ObservabilityError, logging, otel, settings};

/// Runtime observability state. Hold on to it until the server stops so
/// buffered spans can be flushed.
#[derive(Debug)]
pub(crate) struct Observability {
    tracer_provider: Option<SdkTracerProvider>,
}

impl Observability {
    /// Install the global subscriber and, when enabled, the OTLP pipeline.
    pub(crate) fn init(config: &ServerConfig) -> Result<Self, ObservabilityError> {
        let observability = &config.observability;

        settings::apply_runtime_config(observability);

        let tracer_provider = observability
            .otel_enabled
            .then(|| otel::build_tracer_provider(observability))
            .transpose()?;

        if tracer_provider.is_some() {
            global::set_text_map_propagator(TraceContextPropagator::new());
        }

        logging::init_subscriber(config, tracer_provider.as_ref())?;

        info!(
            log_format = ?config.logging.log_format,
            otel_enabled = tracer_provider.is_some(),
            "observability initialised"
        );

        Ok(Self { tracer_provider })
    }

    /// Flush and shutdown telemetry pipelines.
    pub(crate) fn shutdown(self) {
        if let Some(provider) = self.tracer_provider
            && let Err(source) = provider.shutdown()
        {
            error!("failed to shutdown tracer provider: {source}");
        }
    }
}
