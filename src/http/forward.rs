//! Request forwarding.
//!
//! # Responsibilities
//! - Rebuild the inbound request against the chosen backend
//! - Copy headers verbatim in both directions
//! - Stream the backend response body back to the client
//! - Map errors to fixed 500/502 responses

use axum::body::Body;
use axum::http::{request, Request, Response, StatusCode};
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use thiserror::Error;

use crate::balancer::Backend;

/// Shared HTTP client used for forwarding.
pub type HttpClient = Client<HttpConnector, Body>;

/// Errors produced while forwarding a request.
///
/// Every variant maps to a fixed client-facing status with a short body;
/// no internal detail leaks to the client.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The outbound request could not be built. The backend is never
    /// contacted in this case.
    #[error("failed to build outbound request: {0}")]
    Construction(#[from] axum::http::Error),

    /// The backend was unreachable or the transport failed.
    #[error("upstream request failed: {0}")]
    Upstream(hyper_util::client::legacy::Error),
}

impl ForwardError {
    /// Client-facing status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ForwardError::Construction(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ForwardError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Short fixed message written to the client.
    pub fn message(&self) -> &'static str {
        match self {
            ForwardError::Construction(_) => "Failed to create request",
            ForwardError::Upstream(_) => "Failed to forward request",
        }
    }
}

/// Forward an inbound request to the chosen backend and relay the response.
pub async fn forward(
    client: &HttpClient,
    backend: &Backend,
    request: Request<Body>,
) -> Response<Body> {
    match try_forward(client, backend, request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(backend = %backend.url(), error = %e, "Forwarding failed");
            (e.status(), e.message()).into_response()
        }
    }
}

async fn try_forward(
    client: &HttpClient,
    backend: &Backend,
    request: Request<Body>,
) -> Result<Response<Body>, ForwardError> {
    let (parts, body) = request.into_parts();
    let outbound = build_outbound(backend, &parts, body)?;

    let response = client
        .request(outbound)
        .await
        .map_err(ForwardError::Upstream)?;

    // Whole-parts relay: the backend's status and full header map pass
    // through verbatim, duplicate keys included. Mid-stream body errors can
    // only be logged; by then the status line and headers are already
    // committed to the client.
    let backend_url = backend.url().clone();
    let (parts, body) = response.into_parts();
    let body = Body::new(body.map_err(move |e| {
        tracing::error!(backend = %backend_url, error = %e, "Error streaming response body");
        e
    }));

    Ok(Response::from_parts(parts, body))
}

/// Build the outbound request: same method, same path+query, headers copied
/// pair by pair onto a fresh header map so the inbound and outbound requests
/// never alias.
fn build_outbound(
    backend: &Backend,
    parts: &request::Parts,
    body: Body,
) -> Result<Request<Body>, ForwardError> {
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    let uri = format!(
        "{}://{}{}",
        backend.url().scheme(),
        backend.authority(),
        path_and_query
    );

    let mut builder = Request::builder()
        .method(parts.method.clone())
        .uri(uri)
        .version(parts.version);

    if let Some(headers) = builder.headers_mut() {
        for (name, value) in parts.headers.iter() {
            headers.append(name.clone(), value.clone());
        }
    }

    builder.body(body).map_err(ForwardError::Construction)
}
