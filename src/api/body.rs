// Request body intake for POST endpoints
// Bodies are read up to a limit, parsed as JSON and otherwise left alone

use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::Body;
use thiserror::Error;

/// Why a request body could not be accepted
#[derive(Error, Debug)]
pub enum BodyError {
    #[error("Request body exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("Failed to read request body: {0}")]
    Read(String),

    #[error("Request body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// A JSON document accepted from a client and never inspected
#[derive(Debug)]
pub struct OpaquePayload {
    document: Option<serde_json::Value>,
    size: usize,
}

impl OpaquePayload {
    /// Bytes received on the wire
    pub const fn size(&self) -> usize {
        self.size
    }

    /// False when the client sent no body
    pub const fn is_present(&self) -> bool {
        self.document.is_some()
    }
}

/// Read at most `limit` bytes and parse them as JSON
///
/// An empty (or all-whitespace) body is accepted as an absent payload.
pub async fn read_json_body<B>(body: B, limit: usize) -> Result<OpaquePayload, BodyError>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let collected = Limited::new(body, limit).collect().await.map_err(|e| {
        if e.downcast_ref::<LengthLimitError>().is_some() {
            BodyError::TooLarge { limit }
        } else {
            BodyError::Read(e.to_string())
        }
    })?;
    let bytes = collected.to_bytes();

    let document = if bytes.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        Some(serde_json::from_slice(&bytes)?)
    };

    Ok(OpaquePayload {
        document,
        size: bytes.len(),
    })
}
