//! Embedded picker settings

use serde::{Deserialize, Serialize};
use url::Url;

use scl_protocol::{DEFAULT_LINK_TYPE, DEFAULT_MULTIPLE};

use crate::Result;

pub const DEFAULT_PICKER_ADDRESS: &str = "https://dev5.airwatchdev.com/MyDevice/ContentPicker";
pub const DEFAULT_REDIRECT_SCHEME: &str = "scl-file-selected";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedConfig {
    /// Picker page loaded into the web view
    pub picker_address: String,
    pub api_key: String,
    pub link_type: String,
    pub multiple: bool,
    /// Scheme the picker navigates to when the user has picked
    pub redirect_scheme: String,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            picker_address: DEFAULT_PICKER_ADDRESS.to_string(),
            api_key: "dummy_key".to_string(),
            link_type: DEFAULT_LINK_TYPE.to_string(),
            multiple: DEFAULT_MULTIPLE,
            redirect_scheme: DEFAULT_REDIRECT_SCHEME.to_string(),
        }
    }
}

impl EmbedConfig {
    /// Address the web view should load first
    pub fn load_url(&self) -> Result<Url> {
        let address = format!(
            "{}?&apiKey={}&linkType={}&multiple={}&redirectScheme={}",
            self.picker_address,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(&self.link_type),
            self.multiple,
            urlencoding::encode(&self.redirect_scheme),
        );
        Ok(Url::parse(&address)?)
    }
}
