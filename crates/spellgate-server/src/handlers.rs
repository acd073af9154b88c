//! Request handling for the check endpoint.
//!
//! Every path is served by one handler. POST requests are validated in order
//! (content type, body size, JSON string, length, ASCII) and then checked;
//! anything else is redirected to the project page.

use std::error::Error as StdError;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::extract::{ConnectInfo, Request, State};
use axum::http::{HeaderMap, HeaderName, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use http_body_util::LengthLimitError;
use spellgate_core::{RequestOutcome, SpellEngine, ValidationError, decode_text, validate_text};

use crate::checker::{CheckError, SpellChecker};
use crate::error::ApiError;
use crate::telemetry::record_access;

pub const X_CHECK_TIME: HeaderName = HeaderName::from_static("x-check-time");
pub const X_WAIT_TIME: HeaderName = HeaderName::from_static("x-wait-time");

/// Shared state for handlers
pub struct AppState<E> {
    pub checker: SpellChecker<E>,
    pub redirect_url: String,
    pub max_body_bytes: usize,
}

impl<E: SpellEngine> AppState<E> {
    pub fn new(checker: SpellChecker<E>, redirect_url: String, max_body_bytes: usize) -> Self {
        Self {
            checker,
            redirect_url,
            max_body_bytes,
        }
    }
}

/// Check endpoint, mounted as the router fallback.
pub async fn check_handler<E: SpellEngine>(
    State(state): State<Arc<AppState<E>>>,
    request: Request,
) -> Response {
    if request.method() != Method::POST {
        tracing::debug!(method = %request.method(), uri = %request.uri(), "redirecting");
        return (
            StatusCode::FOUND,
            [(header::LOCATION, state.redirect_url.clone())],
        )
            .into_response();
    }

    let client = client_address(&request);
    match check_request(&state, request).await {
        Ok(outcome) => {
            let response = check_response(&outcome);
            record_access(
                outcome.results.len(),
                &client,
                outcome.check_time_ms(),
                outcome.wait_time_ms(),
                state.checker.gate().waiting(),
            );
            response
        }
        Err(err) => err.into_response(),
    }
}

async fn check_request<E: SpellEngine>(
    state: &AppState<E>,
    request: Request,
) -> Result<RequestOutcome, ApiError> {
    if !is_json(request.headers()) {
        return Err(ValidationError::ContentType.into());
    }

    let limit = state.max_body_bytes;
    let body = axum::body::to_bytes(request.into_body(), limit)
        .await
        .map_err(|e| body_error(e, limit))?;

    let text = decode_text(&body)?;
    validate_text(&text)?;

    // Detached so a client disconnect cannot abandon the request mid-queue;
    // it runs to completion and releases the gate like any other.
    let checker = state.checker.clone();
    let outcome = tokio::spawn(async move { checker.check_text(text).await })
        .await
        .map_err(CheckError::from)??;
    Ok(outcome)
}

/// Classify a failed body read: over the cap, or a broken transfer.
fn body_error(err: axum::Error, limit: usize) -> ValidationError {
    let mut source: Option<&(dyn StdError + 'static)> = Some(&err);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return ValidationError::BodyTooLarge { limit };
        }
        source = e.source();
    }
    ValidationError::Body(err.to_string())
}

fn check_response(outcome: &RequestOutcome) -> Response {
    (
        StatusCode::OK,
        [
            (X_CHECK_TIME, outcome.check_time_ms().to_string()),
            (X_WAIT_TIME, outcome.wait_time_ms().to_string()),
        ],
        Json(&outcome.results),
    )
        .into_response()
}

/// `true` if the media type (ignoring parameters) is `application/json`.
pub fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

/// Client for the access line: first `x-forwarded-for` hop, then the peer.
pub fn client_address(request: &Request) -> String {
    let forwarded = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|hop| !hop.is_empty());
    if let Some(hop) = forwarded {
        return hop.to_string();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
