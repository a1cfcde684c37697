use axum::Router;
use http::Request;
use opentelemetry::{global, trace::TraceContextExt as _};
use opentelemetry_http::HeaderExtractor;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{Span, field, info_span};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

/// Wraps every route of the router in a request span.
///
/// The span joins the trace of the caller (W3C `traceparent` header) and
/// records the trace id so console logs can be correlated with the collector.
pub fn add_middleware(router: Router) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http().make_span_with(new_request_span))
            .map_request(accept_trace)
            .map_request(record_trace_id),
    )
}

/// Creates a new tracing span for an incoming request.
///
/// Query strings are left out, they carry authorization codes.
pub fn new_request_span<B>(request: &Request<B>) -> Span {
    info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        trace_id = field::Empty,
    )
}

/// Associates the current span with the trace of the given request.
pub fn accept_trace<B>(request: Request<B>) -> Request<B> {
    let parent_context = global::get_text_map_propagator(|propagator| {
        propagator.extract(&HeaderExtractor(request.headers()))
    });
    Span::current().set_parent(parent_context);

    request
}

/// Records the trace id as `trace_id` in the current span.
pub fn record_trace_id<B>(request: Request<B>) -> Request<B> {
    let span = Span::current();

    let trace_id = span.context().span().span_context().trace_id();
    span.record("trace_id", trace_id.to_string());

    request
}
