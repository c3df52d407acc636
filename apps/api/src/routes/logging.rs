use std::time::Instant;

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::{header, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{info, warn};

const MAX_LOG_LINE_CHARS: usize = 120;

/// Logs one line per `/api` request: method, path, status, latency and the
/// JSON response body.
pub async fn log_api_requests(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    if !path.starts_with("/api") {
        return next.run(request).await;
    }

    let method = request.method().clone();
    let started = Instant::now();
    let response = next.run(request).await;
    let elapsed_ms = started.elapsed().as_millis();
    let status = response.status();

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if !is_json {
        info!("{}", log_line(&method, &path, status, elapsed_ms, None));
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Could not buffer response body for {method} {path}: {e}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let json = String::from_utf8_lossy(&bytes);
    info!(
        "{}",
        log_line(&method, &path, status, elapsed_ms, Some(&json))
    );
    Response::from_parts(parts, Body::from(bytes))
}

fn log_line(
    method: &Method,
    path: &str,
    status: StatusCode,
    elapsed_ms: u128,
    body: Option<&str>,
) -> String {
    let mut line = format!("{method} {path} {} in {elapsed_ms}ms", status.as_u16());
    if let Some(body) = body {
        line.push_str(" :: ");
        line.push_str(body);
    }
    truncate(line, MAX_LOG_LINE_CHARS)
}

fn truncate(line: String, max_chars: usize) -> String {
    if line.chars().count() <= max_chars {
        return line;
    }
    let mut cut: String = line.chars().take(max_chars - 1).collect();
    cut.push('…');
    cut
}
