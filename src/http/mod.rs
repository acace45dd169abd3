//! HTTP protocol layer module
//!
//! Status responses, MIME detection and conditional-GET helpers shared by the
//! page, API and static asset handlers.

pub mod cache;
pub mod methods;
pub mod mime;
pub mod response;

pub use methods::MethodSet;

// Re-export commonly used builders
pub use response::{
    build_304_response, build_404_response, build_405_response, build_413_response,
    build_500_response, build_html_response, build_options_response,
};
