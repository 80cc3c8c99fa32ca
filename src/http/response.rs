//! HTTP response builders
//!
//! One constructor per response shape the server produces. Builder errors
//! cannot occur with these fixed header values, but the fallback keeps the
//! handlers infallible either way.

use super::range::ByteRange;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Build 404 Not Found response
pub fn build_not_found_response() -> Response<Full<Bytes>> {
    plain_text_response(404, "404 Not Found")
}

/// Build 403 Forbidden response (path escaping the served root)
pub fn build_forbidden_response() -> Response<Full<Bytes>> {
    plain_text_response(403, "403 Forbidden")
}

/// Build 405 Method Not Allowed response
pub fn build_method_not_allowed_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| fallback("405", &e))
}

/// Build the pre-flight OPTIONS response: a bare 200 with no body. The
/// CORS headers are appended by the decorator like on every other response.
pub fn build_preflight_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("Content-Length", 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| fallback("OPTIONS", &e))
}

/// Build 301 redirect (directory request missing its trailing slash)
pub fn build_redirect_response(location: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(301)
        .header("Location", location)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("Moved Permanently")))
        .unwrap_or_else(|e| fallback("301", &e))
}

/// Build 304 Not Modified response
pub fn build_not_modified_response(etag: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(304)
        .header("ETag", etag)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| fallback("304", &e))
}

/// Build 416 Range Not Satisfiable response
pub fn build_range_not_satisfiable_response(total_size: u64) -> Response<Full<Bytes>> {
    Response::builder()
        .status(416)
        .header("Content-Type", "text/plain")
        .header("Content-Range", format!("bytes */{total_size}"))
        .body(Full::new(Bytes::from("416 Range Not Satisfiable")))
        .unwrap_or_else(|e| fallback("416", &e))
}

/// Build 200 response carrying file bytes
pub fn build_file_response(
    data: Bytes,
    content_type: &str,
    etag: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Accept-Ranges", "bytes")
        .header("ETag", etag)
        .body(Full::new(body))
        .unwrap_or_else(|e| fallback("200", &e))
}

/// Build 206 Partial Content response for a resolved byte range
pub fn build_partial_response(
    data: Bytes,
    content_type: &str,
    etag: &str,
    range: ByteRange,
    total_size: u64,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(206)
        .header("Content-Type", content_type)
        .header("Content-Length", range.len())
        .header(
            "Content-Range",
            format!("bytes {}-{}/{total_size}", range.start, range.end),
        )
        .header("Accept-Ranges", "bytes")
        .header("ETag", etag)
        .body(Full::new(body))
        .unwrap_or_else(|e| fallback("206", &e))
}

/// Build 200 HTML response (directory listings)
pub fn build_html_response(html: String, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = html.len();
    let body = if is_head { Bytes::new() } else { Bytes::from(html) };

    Response::builder()
        .status(200)
        .header("Content-Type", "text/html")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| fallback("listing", &e))
}

fn plain_text_response(status: u16, message: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(message)))
        .unwrap_or_else(|e| fallback(message, &e))
}

fn fallback(what: &str, error: &hyper::http::Error) -> Response<Full<Bytes>> {
    crate::logger::log_error(&format!("Failed to build {what} response: {error}"));
    Response::new(Full::new(Bytes::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preflight_is_bare_200() {
        let response = build_preflight_response();
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["Content-Length"], "0");
    }

    #[test]
    fn test_not_found() {
        let response = build_not_found_response();
        assert_eq!(response.status(), 404);
    }

    #[test]
    fn test_method_not_allowed_lists_methods() {
        let response = build_method_not_allowed_response();
        assert_eq!(response.status(), 405);
        assert_eq!(response.headers()["Allow"], "GET, HEAD, OPTIONS");
    }

    #[test]
    fn test_file_response_head_drops_body_keeps_length() {
        let response = build_file_response(Bytes::from("abcdef"), "text/css", "\"6-x\"", true);
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["Content-Length"], "6");
        assert_eq!(response.headers()["Content-Type"], "text/css");
    }

    #[test]
    fn test_partial_response_content_range() {
        let range = ByteRange { start: 2, end: 4 };
        let response =
            build_partial_response(Bytes::from("cde"), "text/plain", "\"x\"", range, 10, false);
        assert_eq!(response.status(), 206);
        assert_eq!(response.headers()["Content-Range"], "bytes 2-4/10");
        assert_eq!(response.headers()["Content-Length"], "3");
    }

    #[test]
    fn test_redirect_sets_location() {
        let response = build_redirect_response("/assets/");
        assert_eq!(response.status(), 301);
        assert_eq!(response.headers()["Location"], "/assets/");
    }
}
