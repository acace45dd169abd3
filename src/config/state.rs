// Application state module
// Read-only state shared by every connection

use super::types::Config;
use crate::catalog::Catalog;

/// How JSON payloads are laid out on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonStyle {
    Compact,
    Pretty,
}

/// Application state
///
/// Built once at startup and shared behind an `Arc`; nothing in here is
/// mutated afterwards, so handlers read it without locking.
pub struct AppState {
    pub config: Config,
    pub catalog: Catalog,
    pub json_style: JsonStyle,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let json_style = if config.app.debug {
            JsonStyle::Pretty
        } else {
            JsonStyle::Compact
        };

        Self {
            config: config.clone(),
            catalog: Catalog::builtin(),
            json_style,
        }
    }

    pub const fn access_log(&self) -> bool {
        self.config.logging.access_log
    }
}
