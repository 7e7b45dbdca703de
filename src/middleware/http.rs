//! Transport-level layers shared by every route.
//!
//! Outermost first:
//! - middleware errors → status codes (timeout → 408)
//! - `x-request-id`: generated when absent, echoed on the response
//! - request body cap (`REQUEST_BODY_LIMIT_BYTES`, 413 when exceeded)
//! - per-request deadline (`REQUEST_TIMEOUT_SECONDS`)
//! - access log (`TraceLayer`)

use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::http::{StatusCode, header::HeaderName};
use tower::timeout::{TimeoutLayer, error::Elapsed};
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

async fn error_status(err: BoxError) -> StatusCode {
    if err.is::<Elapsed>() {
        tracing::warn!("request timed out");
        return StatusCode::REQUEST_TIMEOUT;
    }
    tracing::error!(error = %err, "unhandled middleware error");
    StatusCode::INTERNAL_SERVER_ERROR
}

pub fn apply(router: Router, config: &Config) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let deadline = Duration::from_secs(config.request_timeout_seconds);

    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(error_status))
            .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
            .layer(PropagateRequestIdLayer::new(request_id))
            .layer(RequestBodyLimitLayer::new(config.request_body_limit_bytes))
            .layer(TimeoutLayer::new(deadline))
            .layer(TraceLayer::new_for_http()),
    )
}
