// API response utility functions module

use crate::config::JsonStyle;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use super::body::BodyError;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Build JSON response
pub fn json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
    style: JsonStyle,
) -> Response<Full<Bytes>> {
    let encoded = match style {
        JsonStyle::Compact => serde_json::to_vec(body),
        JsonStyle::Pretty => serde_json::to_vec_pretty(body),
    };
    let json = match encoded {
        Ok(j) => j,
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            return raw_json(
                StatusCode::INTERNAL_SERVER_ERROR,
                r#"{"error":"Internal Server Error"}"#,
            );
        }
    };

    Response::builder()
        .status(status)
        .header("Content-Type", JSON_CONTENT_TYPE)
        .header("Content-Length", json.len())
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build response: {e}"));
            Response::new(Full::new(Bytes::from("Error")))
        })
}

/// 404 Not Found response for unknown `/api/` paths
pub fn not_found() -> Response<Full<Bytes>> {
    raw_json(StatusCode::NOT_FOUND, r#"{"error":"Not Found"}"#)
}

/// 400 Bad Request response
pub fn bad_request(message: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "error": "Bad Request",
        "message": message,
    });
    raw_json(StatusCode::BAD_REQUEST, &body.to_string())
}

/// Map a body intake failure to its response
pub fn body_error(err: &BodyError) -> Response<Full<Bytes>> {
    match err {
        BodyError::TooLarge { .. } => crate::http::build_413_response(),
        BodyError::Read(_) | BodyError::InvalidJson(_) => bad_request(&err.to_string()),
    }
}

fn raw_json(status: StatusCode, body: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", JSON_CONTENT_TYPE)
        .body(Full::new(Bytes::from(body.to_owned())))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Error"))))
}
