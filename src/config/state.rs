// Application state module
// Everything a request handler reads; built once at startup, never mutated

use std::path::Path;

use super::types::Config;
use crate::error::WikiError;
use crate::wiki::{PageStore, Templates};

/// Application state
pub struct AppState {
    pub config: Config,
    pub store: PageStore,
    pub templates: Templates,
}

impl AppState {
    /// Build state from configuration, compiling the templates
    ///
    /// Template errors are fatal at startup.
    pub fn new(config: &Config) -> Result<Self, WikiError> {
        let templates = match &config.templates.dir {
            Some(dir) => Templates::load(Path::new(dir))?,
            None => Templates::builtin()?,
        };

        Ok(Self::with_parts(
            config.clone(),
            PageStore::new(&config.wiki.pages_dir),
            templates,
        ))
    }

    pub fn with_parts(config: Config, store: PageStore, templates: Templates) -> Self {
        Self {
            config,
            store,
            templates,
        }
    }
}
