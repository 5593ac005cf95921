//! Forwards `/api/*` to the backend origin configured in `API_URL`.

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::header::{self, HeaderMap, HeaderName};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::models::AppState;

/// Largest request body the proxy buffers before forwarding.
pub const MAX_PROXY_BODY_BYTES: usize = 10 * 1024 * 1024;

static HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    header::HOST,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Upstream URL for a local `/api/...` path (query included):
/// `${API_URL}/api/...`.
pub fn proxy_destination(api_url: &str, path_and_query: &str) -> String {
    format!("{}{}", api_url.trim_end_matches('/'), path_and_query)
}

fn forwardable(headers: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::new();
    for (name, value) in headers {
        if HOP_BY_HOP.contains(name) || name.as_str() == "keep-alive" {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}

fn bad_gateway(detail: String) -> Response {
    (StatusCode::BAD_GATEWAY, Json(serde_json::json!({ "detail": detail }))).into_response()
}

pub async fn proxy_api(State(state): State<AppState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| parts.uri.path());
    let destination = proxy_destination(&state.api_url, path_and_query);

    let body = match axum::body::to_bytes(body, MAX_PROXY_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(%e, "Rejecting oversized or unreadable proxy body");
            return (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response();
        }
    };

    // reqwest sets the length of the buffered body itself
    let mut request_headers = forwardable(&parts.headers);
    request_headers.remove(header::CONTENT_LENGTH);

    tracing::debug!(method = %parts.method, %destination, "Proxying API request");
    let upstream = state
        .client
        .request(parts.method.clone(), &destination)
        .headers(request_headers)
        .body(body)
        .send()
        .await;

    let resp = match upstream {
        Ok(resp) => resp,
        Err(e) => {
            tracing::error!(%e, %destination, "Backend unreachable");
            return bad_gateway(format!("Backend unavailable: {}", e));
        }
    };

    let status = resp.status();
    let headers = forwardable(resp.headers());
    let mut response = Response::new(Body::from_stream(resp.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}
