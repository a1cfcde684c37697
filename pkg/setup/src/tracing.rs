use std::error::Error;

use opentelemetry::global;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::{SpanExporter, WithExportConfig as _};
use opentelemetry_sdk::trace::SdkTracerProvider;
use opentelemetry_sdk::{Resource, propagation::TraceContextPropagator};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "debug,h2=error,hyper=error,hyper_util=error,tonic=error,tower=error";

/// Handle to the installed log transport.
///
/// Keep it alive for the lifetime of the process and call
/// [`Telemetry::shutdown`] before exiting so buffered spans are flushed.
#[derive(Debug)]
pub struct Telemetry {
    tracer_provider: Option<SdkTracerProvider>,
}

impl Telemetry {
    /// Returns true if spans are exported to a remote collector.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.tracer_provider.is_some()
    }

    /// Flushes and shuts down the remote exporter, if any.
    pub fn shutdown(self) -> Result<(), Box<dyn Error>> {
        if let Some(tracer_provider) = self.tracer_provider {
            tracer_provider.shutdown()?;
        }
        Ok(())
    }
}

/// Initializes structured logging.
///
/// Logs always go to the console. When an OTLP endpoint is given, spans and
/// their events are additionally exported to that collector (e.g. an
/// OpenTelemetry collector forwarding to Jaeger or a log backend).
pub fn init_tracing(
    service_name: &'static str,
    otlp_endpoint: Option<&str>,
) -> Result<Telemetry, Box<dyn Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

    let Some(endpoint) = otlp_endpoint else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
        return Ok(Telemetry {
            tracer_provider: None,
        });
    };

    let span_exporter = SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;
    let tracer_provider = SdkTracerProvider::builder()
        .with_resource(Resource::builder().with_service_name(service_name).build())
        .with_batch_exporter(span_exporter)
        .build();

    global::set_text_map_propagator(TraceContextPropagator::new());
    global::set_tracer_provider(tracer_provider.clone());

    let tracer = tracer_provider.tracer(service_name);
    let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()?;

    Ok(Telemetry {
        tracer_provider: Some(tracer_provider),
    })
}
