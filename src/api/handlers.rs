// JSON endpoint handlers
// Every handler answers from the catalog; request payloads are accepted and dropped

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use super::body::OpaquePayload;
use super::response::json_response;
use crate::catalog::{COMPETITORS_ACK, KEYWORDS_ACK, SITEMAPS_ACK};
use crate::config::AppState;
use crate::logger;

/// GET /api/competitors
pub fn list_competitors(state: &AppState) -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, &state.catalog.competitors, state.json_style)
}

/// POST /api/competitors
pub fn ingest_competitors(payload: &OpaquePayload, state: &AppState) -> Response<Full<Bytes>> {
    log_discarded("/api/competitors", payload);
    json_response(StatusCode::OK, &COMPETITORS_ACK, state.json_style)
}

/// GET /api/keywords
pub fn list_keywords(state: &AppState) -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, &state.catalog.keywords, state.json_style)
}

/// POST /api/keywords
pub fn ingest_keywords(payload: &OpaquePayload, state: &AppState) -> Response<Full<Bytes>> {
    log_discarded("/api/keywords", payload);
    json_response(StatusCode::OK, &KEYWORDS_ACK, state.json_style)
}

/// GET /api/sitemaps
pub fn show_sitemap(state: &AppState) -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, &state.catalog.sitemap, state.json_style)
}

/// POST /api/sitemaps
pub fn ingest_sitemaps(payload: &OpaquePayload, state: &AppState) -> Response<Full<Bytes>> {
    log_discarded("/api/sitemaps", payload);
    json_response(StatusCode::OK, &SITEMAPS_ACK, state.json_style)
}

/// POST /api/content
pub fn generate_content(payload: &OpaquePayload, state: &AppState) -> Response<Full<Bytes>> {
    log_discarded("/api/content", payload);
    json_response(StatusCode::OK, &state.catalog.content, state.json_style)
}

/// GET /api/rankings
pub fn show_rankings(state: &AppState) -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, &state.catalog.rankings, state.json_style)
}

fn log_discarded(path: &str, payload: &OpaquePayload) {
    if payload.is_present() {
        logger::log_debug(&format!("{path}: discarded {} byte payload", payload.size()));
    }
}
