//! CORS response decoration
//!
//! The UI bundle is served from a different origin than the backend it
//! talks to, so every response must grant cross-origin access. The values
//! are fixed: wildcard origin, the three methods browsers use against the
//! dev setup, and `Content-Type` as the only requested header.
//!
//! Applied as a decorator after the file-serving logic has produced its
//! response, so error responses (404, 403, 405) carry the headers too.

use hyper::header::{
    HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN,
};
use hyper::Response;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";

/// Append the three CORS headers to a response, overwriting any previous
/// values so the grant is always the fixed one above.
pub fn apply<B>(response: &mut Response<B>) {
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static(ALLOW_ORIGIN));
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS));
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Full;
    use hyper::body::Bytes;

    #[test]
    fn test_headers_added_to_ok_response() {
        let mut response = Response::new(Full::new(Bytes::from("hello")));
        apply(&mut response);
        let headers = response.headers();
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_METHODS], "GET, POST, OPTIONS");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
    }

    #[test]
    fn test_headers_added_to_error_response() {
        let mut response = Response::builder()
            .status(404)
            .body(Full::new(Bytes::new()))
            .unwrap();
        apply(&mut response);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[test]
    fn test_existing_value_is_replaced() {
        let mut response = Response::builder()
            .header(ACCESS_CONTROL_ALLOW_ORIGIN, "http://example.com")
            .body(Full::new(Bytes::new()))
            .unwrap();
        apply(&mut response);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            response
                .headers()
                .get_all(ACCESS_CONTROL_ALLOW_ORIGIN)
                .iter()
                .count(),
            1
        );
    }
}
