//! HTTP middleware stack for the arithmetic server.
//!
//! Layers are listed outer-to-inner: the first layer sees the request first
//! and the response last.

use axum::http::header::HeaderName;
use axum::http::{Method, Request, StatusCode};
use tower::ServiceBuilder;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{MakeSpan, TraceLayer};
use tracing::{info_span, Span};

use super::config::NetworkConfig;
use crate::logging::SERVICE_NAME;

const X_REQUEST_ID: &str = "x-request-id";

/// Creates the per-request span every handler event is recorded under.
///
/// The span carries the service identifier, so file sinks see it on every
/// request-scoped record.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let request_id = request
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("-");

        info_span!(
            "request",
            service = SERVICE_NAME,
            method = %request.method(),
            uri = %request.uri(),
            request_id = request_id,
        )
    }
}

type HttpTraceLayer = TraceLayer<SharedClassifier<ServerErrorsAsFailures>, RequestSpan>;

/// The composed Tower layer type produced by [`build_http_layers`].
type HttpLayers = tower::layer::util::Stack<
    PropagateRequestIdLayer,
    tower::layer::util::Stack<
        TimeoutLayer,
        tower::layer::util::Stack<
            CorsLayer,
            tower::layer::util::Stack<
                CompressionLayer,
                tower::layer::util::Stack<
                    HttpTraceLayer,
                    tower::layer::util::Stack<
                        SetRequestIdLayer<MakeRequestUuid>,
                        tower::layer::util::Identity,
                    >,
                >,
            >,
        >,
    >,
>;

/// Builds the Tower middleware stack from the network configuration.
///
/// **Ordering (outermost to innermost):**
/// 1. `SetRequestId` -- assigns a UUID v4 `X-Request-Id` when the client sent none
/// 2. `Tracing` -- opens the [`RequestSpan`] and logs request/response
/// 3. `Compression` -- gzip when the client accepts it
/// 4. `CORS` -- GET from the configured origins
/// 5. `Timeout` -- 408 once `request_timeout` elapses
/// 6. `PropagateRequestId` -- copies `X-Request-Id` onto the response
#[must_use]
pub fn build_http_layers(config: &NetworkConfig) -> HttpLayers {
    let x_request_id = HeaderName::from_static(X_REQUEST_ID);

    ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
        .layer(TraceLayer::new_for_http().make_span_with(RequestSpan))
        .layer(CompressionLayer::new())
        .layer(build_cors_layer(&config.cors_origins))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(PropagateRequestIdLayer::new(x_request_id))
        .into_inner()
}

/// Builds the CORS layer. A `"*"` entry allows any origin; otherwise
/// unparseable origins are skipped.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let parsed: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET])
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn build_http_layers_does_not_panic_with_defaults() {
        let _layers = build_http_layers(&NetworkConfig::default());
    }

    #[test]
    fn build_http_layers_with_explicit_origins_and_timeout() {
        let config = NetworkConfig {
            cors_origins: vec![
                "http://localhost:8080".to_string(),
                "not a header value\n".to_string(),
            ],
            request_timeout: Duration::from_secs(5),
            ..NetworkConfig::default()
        };
        let _layers = build_http_layers(&config);
    }

    #[test]
    fn request_span_builds_without_subscriber() {
        let request = Request::builder()
            .uri("/add?num1=1&num2=2")
            .header(X_REQUEST_ID, "abc-123")
            .body(())
            .unwrap();
        let span = RequestSpan.make_span(&request);
        // No subscriber installed in unit tests.
        assert!(span.is_disabled());
    }
}
