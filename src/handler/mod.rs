//! Request handler module
//!
//! Routes requests to page views, JSON endpoints and static assets.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::{handle_request, Route};
