//! HTTP helper modules
//!
//! Pure response-side building blocks, decoupled from request routing:
//! MIME lookup, CORS decoration, conditional GET, byte ranges, and
//! status response builders.

pub mod cache;
pub mod cors;
pub mod mime;
pub mod range;
pub mod response;

pub use response::{
    build_forbidden_response, build_method_not_allowed_response, build_not_found_response,
    build_preflight_response, build_redirect_response,
};
