//! Static file serving module
//!
//! Serves the dashboard's scripts and stylesheets from the static directory.

use crate::handler::router::STATIC_PREFIX;
use crate::http::{self, cache, mime, response::build_cached_response};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Serve `/static/<relative>` from `static_dir`
pub async fn serve_static(
    path: &str,
    if_none_match: Option<&str>,
    static_dir: &str,
) -> Response<Full<Bytes>> {
    let Some(relative) = path.strip_prefix(STATIC_PREFIX) else {
        return http::build_404_response();
    };

    match load_asset(static_dir, relative).await {
        Some((content, content_type)) => {
            let etag = cache::generate_etag(&content);
            if cache::check_etag_match(if_none_match, &etag) {
                return http::build_304_response(&etag);
            }
            build_cached_response(Bytes::from(content), content_type, &etag)
        }
        None => http::build_404_response(),
    }
}

/// Resolve `relative` inside `static_dir`, refusing anything that escapes it
fn resolve_asset_path(static_dir: &Path, relative: &str) -> Option<PathBuf> {
    let static_dir_canonical = match static_dir.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static directory not found or inaccessible '{}': {e}",
                static_dir.display()
            ));
            return None;
        }
    };

    // Missing files are an ordinary 404
    let file_path = static_dir.join(relative.trim_start_matches('/')).canonicalize().ok()?;
    if !file_path.starts_with(&static_dir_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {relative} -> {}",
            file_path.display()
        ));
        return None;
    }
    file_path.is_file().then_some(file_path)
}

/// Load an asset and its content type
pub async fn load_asset(static_dir: &str, relative: &str) -> Option<(Vec<u8>, &'static str)> {
    let file_path = resolve_asset_path(Path::new(static_dir), relative)?;

    let content = match fs::read(&file_path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file_path.display()
            ));
            return None;
        }
    };

    let content_type = mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));
    Some((content, content_type))
}
