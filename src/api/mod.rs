// API module entry
// JSON endpoints under /api/

mod body;
mod handlers;
mod response;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};

use crate::config::AppState;
use crate::http::{self, MethodSet};

pub use body::{read_json_body, BodyError, OpaquePayload};
pub use response::{bad_request, json_response, not_found, JSON_CONTENT_TYPE};

/// Handler for a POST endpoint once its body has been accepted
type PostHandler = fn(&OpaquePayload, &AppState) -> Response<Full<Bytes>>;

/// The JSON endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiEndpoint {
    Competitors,
    Keywords,
    Sitemaps,
    Content,
    Rankings,
}

impl ApiEndpoint {
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/api/competitors" => Some(Self::Competitors),
            "/api/keywords" => Some(Self::Keywords),
            "/api/sitemaps" => Some(Self::Sitemaps),
            "/api/content" => Some(Self::Content),
            "/api/rankings" => Some(Self::Rankings),
            _ => None,
        }
    }

    pub const fn methods(self) -> MethodSet {
        match self {
            Self::Competitors | Self::Keywords | Self::Sitemaps => MethodSet::GET_POST,
            Self::Content => MethodSet::POST,
            Self::Rankings => MethodSet::GET,
        }
    }
}

/// Dispatch an API request
///
/// GET serves the canned payload. POST reads and discards the JSON body, then
/// answers with an acknowledgement (or the content draft for `/api/content`).
pub async fn handle_api<B>(
    endpoint: ApiEndpoint,
    req: Request<B>,
    state: &AppState,
) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let (parts, body) = req.into_parts();

    match (parts.method, endpoint) {
        (Method::GET | Method::HEAD, ApiEndpoint::Competitors) => handlers::list_competitors(state),
        (Method::GET | Method::HEAD, ApiEndpoint::Keywords) => handlers::list_keywords(state),
        (Method::GET | Method::HEAD, ApiEndpoint::Sitemaps) => handlers::show_sitemap(state),
        (Method::GET | Method::HEAD, ApiEndpoint::Rankings) => handlers::show_rankings(state),
        (Method::POST, ApiEndpoint::Competitors) => {
            with_payload(body, state, handlers::ingest_competitors).await
        }
        (Method::POST, ApiEndpoint::Keywords) => {
            with_payload(body, state, handlers::ingest_keywords).await
        }
        (Method::POST, ApiEndpoint::Sitemaps) => {
            with_payload(body, state, handlers::ingest_sitemaps).await
        }
        (Method::POST, ApiEndpoint::Content) => {
            with_payload(body, state, handlers::generate_content).await
        }
        _ => http::build_405_response(endpoint.methods().allow_header()),
    }
}

async fn with_payload<B>(body: B, state: &AppState, handler: PostHandler) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let limit = usize::try_from(state.config.http.max_body_size).unwrap_or(usize::MAX);
    match read_json_body(body, limit).await {
        Ok(payload) => handler(&payload, state),
        Err(err) => {
            crate::logger::log_warning(&format!("Rejected request body: {err}"));
            response::body_error(&err)
        }
    }
}
