//! SEO dashboard server
//!
//! Serves the dashboard's HTML views, its static assets and a set of JSON
//! endpoints backed by a fixed in-memory catalog.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod pages;
pub mod server;

pub use error::Error;
