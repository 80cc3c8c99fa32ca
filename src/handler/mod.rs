//! Request handling entry point
//!
//! Validates the method, decodes the path, dispatches to static file
//! serving, and decorates every outgoing response with the CORS grant
//! before it leaves the handler.

pub mod listing;
pub mod static_files;

use crate::config::AppState;
use crate::http::{self, cors};
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Per-request data extracted up front so the serving code does not need
/// the original request anymore.
pub struct RequestContext {
    /// Percent-decoded request path, e.g. `/css/app.css`.
    pub path: String,
    /// Path exactly as received, used when building redirect targets.
    pub raw_path: String,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub range: Option<String>,
}

/// Main entry point for HTTP request handling. Infallible: every failure
/// mode maps to an HTTP error response.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let raw_path = req.uri().path().to_string();

    let mut response = match method {
        Method::GET | Method::HEAD => {
            let ctx = RequestContext {
                path: decode_request_path(&raw_path),
                raw_path: raw_path.clone(),
                is_head: method == Method::HEAD,
                if_none_match: header_value(&req, "if-none-match"),
                range: header_value(&req, "range"),
            };
            static_files::serve(&ctx, &state).await
        }
        // Pre-flight: browsers probe with OPTIONS before cross-origin calls
        Method::OPTIONS => http::build_preflight_response(),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            http::build_method_not_allowed_response()
        }
    };

    // Every response carries the CORS grant, error responses included
    cors::apply(&mut response);

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(&remote_addr, method.as_str(), &raw_path);
        entry.status = response.status().as_u16();
        entry.body_bytes = usize::try_from(response.body().size_hint().exact().unwrap_or(0))
            .unwrap_or(usize::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

fn header_value<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// Decode `%XX` escapes in a request path. Invalid escapes are passed
/// through untouched; non-UTF-8 results are replaced lossily.
fn decode_request_path(path: &str) -> String {
    let bytes = path.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hex = &path[i + 1..i + 3];
            if let Ok(byte) = u8::from_str_radix(hex, 16) {
                decoded.push(byte);
                i += 3;
                continue;
            }
        }
        decoded.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&decoded).into_owned()
}
