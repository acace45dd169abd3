//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: route lookup, method validation,
//! body-size guard, dispatch, response decoration and access logging.

use crate::api::{self, ApiEndpoint};
use crate::config::{AppState, HttpConfig};
use crate::handler::static_files;
use crate::http::{self, MethodSet};
use crate::logger::{self, AccessLogEntry};
use crate::pages::Page;
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{self, HeaderValue};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Static assets are served below this prefix
pub const STATIC_PREFIX: &str = "/static/";

/// What a request path resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Page(Page),
    Api(ApiEndpoint),
    Static,
}

impl Route {
    pub fn resolve(path: &str) -> Option<Self> {
        if let Some(page) = Page::from_path(path) {
            return Some(Self::Page(page));
        }
        if let Some(endpoint) = ApiEndpoint::from_path(path) {
            return Some(Self::Api(endpoint));
        }
        if path.len() > STATIC_PREFIX.len() && path.starts_with(STATIC_PREFIX) {
            return Some(Self::Static);
        }
        None
    }

    pub const fn methods(self) -> MethodSet {
        match self {
            Self::Page(_) | Self::Static => MethodSet::GET,
            Self::Api(endpoint) => endpoint.methods(),
        }
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let is_head = req.method() == Method::HEAD;

    logger::log_debug(&format!(
        "[Request] {} {} {:?}",
        req.method(),
        req.uri(),
        req.version()
    ));
    logger::log_headers_count(req.headers().len(), state.config.logging.show_headers);

    let access_entry = state.access_log().then(|| access_entry(&req, peer_addr));

    let mut response = route_request(req, &state).await;
    decorate_response(&mut response, &state.config.http);

    if is_head {
        *response.body_mut() = Full::new(Bytes::new());
    }

    if let Some(mut entry) = access_entry {
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route request based on path and method
async fn route_request<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let Some(route) = Route::resolve(req.uri().path()) else {
        return if req.uri().path().starts_with("/api/") {
            api::not_found()
        } else {
            http::build_404_response()
        };
    };

    let allowed = route.methods();
    if req.method() == Method::OPTIONS {
        return http::build_options_response(allowed.allow_header(), state.config.http.enable_cors);
    }
    if !allowed.allows(req.method()) {
        logger::log_warning(&format!(
            "Method not allowed: {} {}",
            req.method(),
            req.uri().path()
        ));
        return http::build_405_response(allowed.allow_header());
    }

    if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        return resp;
    }

    match route {
        Route::Page(page) => serve_page(page),
        Route::Api(endpoint) => api::handle_api(endpoint, req, state).await,
        Route::Static => {
            let if_none_match = req
                .headers()
                .get(header::IF_NONE_MATCH)
                .and_then(|v| v.to_str().ok());
            static_files::serve_static(req.uri().path(), if_none_match, &state.config.app.static_dir)
                .await
        }
    }
}

fn serve_page(page: Page) -> Response<Full<Bytes>> {
    match page.render() {
        Ok(html) => http::build_html_response(html),
        Err(e) => {
            logger::log_error(&format!("Failed to render {}: {e}", page.path()));
            http::build_500_response()
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let size_str = req.headers().get(header::CONTENT_LENGTH)?.to_str().ok()?;
    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger::log_warning(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Some(http::build_413_response())
        }
        Ok(_) => None,
        Err(_) => {
            logger::log_warning(&format!(
                "Invalid Content-Length value: '{size_str}', skipping size check"
            ));
            None
        }
    }
}

/// Add the `Server` header and, when enabled, the CORS origin header
fn decorate_response(response: &mut Response<Full<Bytes>>, http_config: &HttpConfig) {
    let headers = response.headers_mut();
    if let Ok(server) = HeaderValue::from_str(&http_config.server_name) {
        headers.insert(header::SERVER, server);
    }
    if http_config.enable_cors {
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        );
    }
}

fn access_entry<B>(req: &Request<B>, peer_addr: SocketAddr) -> AccessLogEntry {
    let header_str = |name: header::HeaderName| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = http_version(req.version()).to_string();
    entry.referer = header_str(header::REFERER);
    entry.user_agent = header_str(header::USER_AGENT);
    entry
}

fn http_version(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_09 => "0.9",
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use http_body_util::BodyExt;
    use hyper::{HeaderMap, StatusCode};
    use serde_json::Value;

    const API_GET_ROUTES: [&str; 4] = [
        "/api/competitors",
        "/api/keywords",
        "/api/sitemaps",
        "/api/rankings",
    ];

    struct Reply {
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
    }

    impl Reply {
        fn json(&self) -> Value {
            serde_json::from_slice(&self.body).unwrap()
        }

        fn text(&self) -> String {
            String::from_utf8(self.body.to_vec()).unwrap()
        }
    }

    fn test_config() -> Config {
        let mut cfg = Config::builtin().unwrap();
        cfg.app.static_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/static").to_string();
        cfg.logging.access_log = false;
        cfg
    }

    fn state_with(cfg: &Config) -> Arc<AppState> {
        Arc::new(AppState::new(cfg))
    }

    fn test_state() -> Arc<AppState> {
        state_with(&test_config())
    }

    async fn send_request(state: &Arc<AppState>, req: Request<Full<Bytes>>) -> Reply {
        let peer: SocketAddr = "127.0.0.1:40000".parse().unwrap();
        let resp = handle_request(req, Arc::clone(state), peer).await.unwrap();
        let (parts, body) = resp.into_parts();
        Reply {
            status: parts.status,
            headers: parts.headers,
            body: body.collect().await.unwrap().to_bytes(),
        }
    }

    async fn send(state: &Arc<AppState>, method: Method, path: &str, body: &str) -> Reply {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .body(Full::new(Bytes::from(body.to_owned())))
            .unwrap();
        send_request(state, req).await
    }

    #[test]
    fn test_resolve() {
        assert_eq!(Route::resolve("/"), Some(Route::Page(Page::Dashboard)));
        assert_eq!(
            Route::resolve("/api/keywords"),
            Some(Route::Api(ApiEndpoint::Keywords))
        );
        assert_eq!(Route::resolve("/static/js/app.js"), Some(Route::Static));
        assert_eq!(Route::resolve("/static/"), None);
        assert_eq!(Route::resolve("/api/unknown"), None);
    }

    #[tokio::test]
    async fn test_page_routes_render_html() {
        let state = test_state();
        for page in Page::ALL {
            let reply = send(&state, Method::GET, page.path(), "").await;
            assert_eq!(reply.status, StatusCode::OK, "{}", page.path());
            assert_eq!(reply.headers["content-type"], "text/html; charset=utf-8");
            assert!(reply.text().contains(page.title()), "{}", page.path());
        }
    }

    #[tokio::test]
    async fn test_get_competitors() {
        let reply = send(&test_state(), Method::GET, "/api/competitors", "").await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.headers["content-type"], "application/json");

        let records = reply.json();
        let records = records.as_array().unwrap();
        assert_eq!(records.len(), 3);
        for record in records {
            let overlap = record["overlap"].as_u64().unwrap();
            assert!(overlap <= 100);
        }
    }

    #[tokio::test]
    async fn test_get_keywords() {
        let reply = send(&test_state(), Method::GET, "/api/keywords", "").await;
        let records = reply.json();
        let records = records.as_array().unwrap();
        assert_eq!(records.len(), 3);
        for record in records {
            assert!(record["difficulty"].as_u64().unwrap() <= 100);
            let opportunity = record["opportunity"].as_str().unwrap();
            assert!(["low", "medium", "high"].contains(&opportunity));
        }
        assert_eq!(records[0]["cpc"], 15.2);
    }

    #[tokio::test]
    async fn test_get_sitemaps() {
        let reply = send(&test_state(), Method::GET, "/api/sitemaps", "").await;
        let sitemap = reply.json();
        assert_eq!(sitemap["domain"], "competitor1.com");

        let pages = sitemap["pages"].as_array().unwrap();
        assert_eq!(pages.len(), 4);
        assert!(pages.iter().all(|p| p["depth"].as_u64().unwrap() >= 1));
        assert_eq!(pages[0]["url"], "/home");
        assert_eq!(pages[3]["url"], "/blog/seo-tips");
        assert_eq!(pages[3]["type"], "post");
    }

    #[tokio::test]
    async fn test_post_acknowledgements_ignore_body() {
        let state = test_state();
        let cases = [
            ("/api/competitors", "Competitor data processed"),
            ("/api/keywords", "Keyword data processed"),
            ("/api/sitemaps", "Sitemap data processed"),
        ];
        for (path, message) in cases {
            for body in ["{}", r#"{"domain":"example.com","depth":[1,2]}"#, ""] {
                let reply = send(&state, Method::POST, path, body).await;
                assert_eq!(reply.status, StatusCode::OK, "{path} {body}");
                assert_eq!(
                    reply.text(),
                    format!(r#"{{"message":"{message}","status":"success"}}"#)
                );
            }
        }
    }

    #[tokio::test]
    async fn test_post_content() {
        let reply = send(
            &test_state(),
            Method::POST,
            "/api/content",
            r#"{"topic":"seo","keyword":"tools","tone":"casual"}"#,
        )
        .await;
        assert_eq!(reply.status, StatusCode::OK);
        let draft = reply.json();
        assert_eq!(draft["title"], "How to Analyze Your SEO Competitors");
        assert_eq!(draft["outline"].as_array().unwrap().len(), 5);
        assert_eq!(draft["seo_score"], 85);
    }

    #[tokio::test]
    async fn test_get_rankings_align_with_dates() {
        let reply = send(&test_state(), Method::GET, "/api/rankings", "").await;
        let data = reply.json();
        let dates = data["dates"].as_array().unwrap();
        assert_eq!(dates.len(), 4);

        let rankings = data["rankings"].as_object().unwrap();
        assert_eq!(rankings.len(), 2);
        for per_keyword in rankings.values() {
            for positions in per_keyword.as_object().unwrap().values() {
                assert_eq!(positions.as_array().unwrap().len(), dates.len());
            }
        }
    }

    #[tokio::test]
    async fn test_api_responses_are_byte_identical() {
        let state = test_state();
        for path in API_GET_ROUTES {
            let first = send(&state, Method::GET, path, "").await;
            let second = send(&state, Method::GET, path, "").await;
            assert_eq!(first.body, second.body, "{path}");
        }
    }

    #[tokio::test]
    async fn test_method_not_allowed() {
        let state = test_state();

        let reply = send(&state, Method::DELETE, "/api/competitors", "").await;
        assert_eq!(reply.status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(reply.headers["allow"], "GET, HEAD, POST, OPTIONS");

        let reply = send(&state, Method::GET, "/api/content", "").await;
        assert_eq!(reply.status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(reply.headers["allow"], "POST, OPTIONS");

        let reply = send(&state, Method::POST, "/api/rankings", "{}").await;
        assert_eq!(reply.status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(reply.headers["allow"], "GET, HEAD, OPTIONS");

        let reply = send(&state, Method::POST, "/keywords", "{}").await;
        assert_eq!(reply.status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_options_lists_methods() {
        let reply = send(&test_state(), Method::OPTIONS, "/api/content", "").await;
        assert_eq!(reply.status, StatusCode::NO_CONTENT);
        assert_eq!(reply.headers["allow"], "POST, OPTIONS");
    }

    #[tokio::test]
    async fn test_not_found() {
        let state = test_state();

        let reply = send(&state, Method::GET, "/missing", "").await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND);
        assert_eq!(reply.headers["content-type"], "text/plain");

        let reply = send(&state, Method::GET, "/api/missing", "").await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND);
        assert_eq!(reply.json()["error"], "Not Found");

        let reply = send(&state, Method::GET, "/competitors/", "").await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let reply = send(&test_state(), Method::POST, "/api/keywords", "{oops").await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert_eq!(reply.json()["error"], "Bad Request");
    }

    #[tokio::test]
    async fn test_oversized_body() {
        let mut cfg = test_config();
        cfg.http.max_body_size = 8;
        let state = state_with(&cfg);

        // Declared length
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/competitors")
            .header("content-length", "64")
            .body(Full::new(Bytes::from(vec![b' '; 64])))
            .unwrap();
        let reply = send_request(&state, req).await;
        assert_eq!(reply.status, StatusCode::PAYLOAD_TOO_LARGE);

        // No declared length, caught while reading
        let reply = send(&state, Method::POST, "/api/competitors", r#"{"domain":"example.com"}"#).await;
        assert_eq!(reply.status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_head_has_no_body() {
        let state = test_state();
        let reply = send(&state, Method::HEAD, "/", "").await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.headers["content-type"], "text/html; charset=utf-8");
        assert!(reply.body.is_empty());

        let reply = send(&state, Method::HEAD, "/api/rankings", "").await;
        assert_eq!(reply.status, StatusCode::OK);
        assert!(reply.body.is_empty());
    }

    #[tokio::test]
    async fn test_static_asset() {
        let reply = send(&test_state(), Method::GET, "/static/js/app.js", "").await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.headers["content-type"], "application/javascript");
        assert!(reply.text().contains("/api/competitors"));
    }

    #[tokio::test]
    async fn test_server_and_cors_headers() {
        let reply = send(&test_state(), Method::GET, "/api/keywords", "").await;
        assert_eq!(reply.headers["server"], "seo-dashboard");
        assert!(reply.headers.get("access-control-allow-origin").is_none());

        let mut cfg = test_config();
        cfg.http.enable_cors = true;
        let reply = send(&state_with(&cfg), Method::GET, "/api/keywords", "").await;
        assert_eq!(reply.headers["access-control-allow-origin"], "*");
    }

    #[tokio::test]
    async fn test_debug_mode_pretty_prints() {
        let mut cfg = test_config();
        cfg.app.debug = true;
        let reply = send(&state_with(&cfg), Method::GET, "/api/rankings", "").await;
        assert!(reply.text().contains("\n  \"dates\""));
    }
}
