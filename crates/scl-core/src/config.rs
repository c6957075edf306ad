//! Picker configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use scl_embed::{EmbedConfig, EmbeddedPickerView};
use scl_picker::{FilePicker, MessageBus, PickerHost, Scheduler};
use scl_protocol::{InitOptions, PopupProperties};

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content-locker domain; the picker refuses to open without one
    pub domain: Option<String>,
    pub popup: PopupProperties,
    pub embed: EmbedConfig,
    /// `tracing` filter directive
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domain: None,
            popup: PopupProperties::default(),
            embed: EmbedConfig::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON config file; absent fields take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        tracing::info!(path = %path.display(), "Loaded picker configuration");
        Ok(config)
    }

    /// Build a picker for `host` and initialize it with the configured domain
    pub fn build_picker(
        &self,
        host: Arc<dyn PickerHost>,
        scheduler: Arc<dyn Scheduler>,
        bus: MessageBus,
    ) -> Result<FilePicker> {
        let picker = FilePicker::with_properties(host, scheduler, bus, self.popup.clone());
        picker.initialize(InitOptions {
            domain: self.domain.clone(),
        })?;
        Ok(picker)
    }

    pub fn embedded_view(&self) -> EmbeddedPickerView {
        EmbeddedPickerView::new(self.embed.clone())
    }
}
