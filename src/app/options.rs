use std::{sync::Arc, time::Duration};

use crate::submit::DEFAULT_ENDPOINT;

use super::keymap::{self, KeymapStore};

#[derive(Debug, Clone)]
pub struct BuilderOptions {
    /// Endpoint receiving the submitted field definition.
    pub endpoint: String,
    pub tick_rate: Duration,
    /// Whether the choices editor can paint highlight groups. Without it,
    /// duplicate and length checks are skipped.
    pub highlighting: bool,
    pub confirm_exit: bool,
    pub show_help: bool,
    pub(crate) keymap_store: Arc<KeymapStore>,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            tick_rate: Duration::from_millis(100),
            highlighting: true,
            confirm_exit: true,
            show_help: true,
            keymap_store: keymap::default_store(),
        }
    }
}

impl BuilderOptions {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn with_highlighting(mut self, enabled: bool) -> Self {
        self.highlighting = enabled;
        self
    }

    pub fn with_confirm_exit(mut self, confirm: bool) -> Self {
        self.confirm_exit = confirm;
        self
    }

    pub fn with_help(mut self, show: bool) -> Self {
        self.show_help = show;
        self
    }
}
