//! Static file serving
//!
//! Resolves request paths against the served root, rejects anything that
//! escapes it, and builds file, index, and listing responses.

use crate::config::AppState;
use crate::handler::{listing, RequestContext};
use crate::http::{self, cache, mime, range};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Result of resolving a request path against the root directory.
#[derive(Debug)]
pub enum Resolved {
    File(PathBuf),
    Directory(PathBuf),
    NotFound,
    /// The canonical path escapes the root (traversal or symlink).
    Forbidden,
}

/// Resolve a decoded request path to a filesystem location.
///
/// The joined path is canonicalized and must stay under `root`; `root`
/// itself is canonical already (done once at startup), so a plain prefix
/// check is sound here.
pub fn resolve_path(root: &Path, request_path: &str) -> Resolved {
    if request_path.contains('\0') {
        return Resolved::Forbidden;
    }

    let joined = root.join(request_path.trim_start_matches('/'));
    let Ok(canonical) = joined.canonicalize() else {
        // Nonexistent paths (including dangling traversals) are plain 404s
        return Resolved::NotFound;
    };

    if !canonical.starts_with(root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {request_path} -> {}",
            canonical.display()
        ));
        return Resolved::Forbidden;
    }

    if canonical.is_dir() {
        Resolved::Directory(canonical)
    } else {
        Resolved::File(canonical)
    }
}

/// Serve a GET/HEAD request from the root directory.
pub async fn serve(ctx: &RequestContext, state: &AppState) -> Response<Full<Bytes>> {
    match resolve_path(&state.root, &ctx.path) {
        Resolved::File(path) => serve_file(ctx, &path).await,
        Resolved::Directory(dir) => serve_directory(ctx, state, &dir).await,
        Resolved::NotFound => http::build_not_found_response(),
        Resolved::Forbidden => http::build_forbidden_response(),
    }
}

/// Serve a regular file: conditional GET, byte ranges, then the full body.
async fn serve_file(ctx: &RequestContext, path: &Path) -> Response<Full<Bytes>> {
    let data = match fs::read(path).await {
        Ok(data) => data,
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{}': {e}", path.display()));
            return http::build_not_found_response();
        }
    };

    let etag = cache::etag_for(&data);
    if cache::revalidates(ctx.if_none_match.as_deref(), &etag) {
        return http::response::build_not_modified_response(&etag);
    }

    let content_type = mime::content_type_for(path);
    let total = data.len() as u64;

    match range::resolve_range(ctx.range.as_deref(), total) {
        range::RangeOutcome::Partial(byte_range) => {
            let start = usize::try_from(byte_range.start).unwrap_or(usize::MAX);
            let end = usize::try_from(byte_range.end).unwrap_or(usize::MAX);
            let slice = Bytes::from(data[start..=end].to_vec());
            http::response::build_partial_response(
                slice,
                content_type,
                &etag,
                byte_range,
                total,
                ctx.is_head,
            )
        }
        range::RangeOutcome::Unsatisfiable => {
            http::response::build_range_not_satisfiable_response(total)
        }
        range::RangeOutcome::Full => http::response::build_file_response(
            Bytes::from(data),
            content_type,
            &etag,
            ctx.is_head,
        ),
    }
}

/// Serve a directory: redirect to the slash form, then index files, then a
/// generated listing when enabled.
async fn serve_directory(
    ctx: &RequestContext,
    state: &AppState,
    dir: &Path,
) -> Response<Full<Bytes>> {
    // Relative links inside the directory only resolve against the slash
    // form of the URL
    if !ctx.raw_path.ends_with('/') {
        return http::build_redirect_response(&format!("{}/", ctx.raw_path));
    }

    for index in &state.config.files.index_files {
        let candidate = dir.join(index);
        if candidate.is_file() {
            return serve_file(ctx, &candidate).await;
        }
    }

    if !state.config.files.directory_listing {
        return http::build_not_found_response();
    }

    match listing::render(dir, &ctx.path).await {
        Ok(html) => http::response::build_html_response(html, ctx.is_head),
        Err(e) => {
            logger::log_error(&format!("Failed to list '{}': {e}", dir.display()));
            http::build_not_found_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_root(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("uiserve-resolve-{}-{name}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir.canonicalize().unwrap()
    }

    #[test]
    fn test_resolve_regular_file() {
        let root = fixture_root("file");
        std::fs::write(root.join("a.txt"), "x").unwrap();
        assert!(matches!(resolve_path(&root, "/a.txt"), Resolved::File(_)));
    }

    #[test]
    fn test_resolve_directory() {
        let root = fixture_root("dir");
        std::fs::create_dir(root.join("sub")).unwrap();
        assert!(matches!(resolve_path(&root, "/sub"), Resolved::Directory(_)));
        assert!(matches!(resolve_path(&root, "/"), Resolved::Directory(_)));
    }

    #[test]
    fn test_resolve_missing() {
        let root = fixture_root("missing");
        assert!(matches!(resolve_path(&root, "/nope"), Resolved::NotFound));
    }

    #[test]
    fn test_resolve_traversal_to_existing_path() {
        let root = fixture_root("traversal");
        // The parent of the fixture root exists, so canonicalization
        // succeeds and the prefix check has to do the rejecting.
        assert!(matches!(resolve_path(&root, "/.."), Resolved::Forbidden));
        assert!(matches!(
            resolve_path(&root, "/../../etc/passwd"),
            Resolved::Forbidden | Resolved::NotFound
        ));
    }

    #[test]
    fn test_resolve_nul_byte() {
        let root = fixture_root("nul");
        assert!(matches!(resolve_path(&root, "/a\0b"), Resolved::Forbidden));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_symlink_escaping_root() {
        let root = fixture_root("symlink");
        std::os::unix::fs::symlink("/etc", root.join("escape")).unwrap();
        assert!(matches!(
            resolve_path(&root, "/escape/passwd"),
            Resolved::Forbidden
        ));
    }
}
