//! Popup properties and picker addresses
//!
//! Outbound address:
//! ```text
//! scheme://domain/path?origin=<caller origin>&linkType=..&multiple=..[&extra=..]
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::options::OpenOptions;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupProperties {
    /// Scheme prefix, including `://`
    pub scheme: String,
    /// Picker path on the content-locker domain
    pub path: String,
    /// Relay frame path on the content-locker domain
    pub relay_path: String,
    pub width: u32,
    pub height: u32,
    pub window_name: String,
    pub relay_frame_id: String,
    /// Liveness poll cadence
    pub poll_interval_ms: u64,
}

impl Default for PopupProperties {
    fn default() -> Self {
        Self {
            // https in production deployments
            scheme: "http://".to_string(),
            path: "/path/to/popup".to_string(),
            relay_path: "/path/to/iframe.htm".to_string(),
            width: 590,
            height: 520,
            window_name: "SCLFilePicker_popup".to_string(),
            relay_frame_id: "SCLFilePicker_iframe".to_string(),
            poll_interval_ms: 100,
        }
    }
}

impl PopupProperties {
    /// Origin the picker's messages must advertise
    pub fn origin(&self, domain: &str) -> String {
        format!("{}{}", self.scheme, domain)
    }

    pub fn popup_address(
        &self,
        domain: &str,
        caller_origin: &str,
        options: &OpenOptions,
    ) -> Result<Url> {
        let mut address = format!(
            "{}{}?origin={}",
            self.origin(domain),
            self.path,
            urlencoding::encode(caller_origin)
        );

        for (key, value) in options.query_params() {
            address.push('&');
            address.push_str(&urlencoding::encode(&key));
            address.push('=');
            address.push_str(&urlencoding::encode(&value));
        }

        Ok(Url::parse(&address)?)
    }

    pub fn relay_address(&self, domain: &str) -> Result<Url> {
        Ok(Url::parse(&format!("{}{}", self.origin(domain), self.relay_path))?)
    }

    /// Feature string handed to the window-open call
    pub fn window_features(&self) -> String {
        format!("height={},width={}", self.height, self.width)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Strip a leading `http://` or `https://`; blank domains count as missing
pub fn normalize_domain(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let stripped = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);

    if stripped.is_empty() {
        None
    } else {
        Some(stripped.to_string())
    }
}
