//! Caller-facing options
//!
//! `OpenOptions` travel to the picker as query parameters. Keys the caller
//! leaves out fall back to the defaults below.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const DEFAULT_LINK_TYPE: &str = "preview";
pub const DEFAULT_MULTIPLE: bool = false;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple: Option<bool>,
    /// Additional keys, forwarded verbatim after the defaulted ones
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl OpenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn link_type(mut self, link_type: impl Into<String>) -> Self {
        self.link_type = Some(link_type.into());
        self
    }

    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = Some(multiple);
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Query parameters in wire order: defaulted keys first, then extras
    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            (
                "linkType".to_string(),
                self.link_type
                    .clone()
                    .unwrap_or_else(|| DEFAULT_LINK_TYPE.to_string()),
            ),
            (
                "multiple".to_string(),
                self.multiple.unwrap_or(DEFAULT_MULTIPLE).to_string(),
            ),
        ];

        for (key, value) in &self.extra {
            if key == "linkType" || key == "multiple" || key == "origin" {
                tracing::debug!(key = %key, "Ignoring reserved picker option");
                continue;
            }
            params.push((key.clone(), param_value(value)));
        }

        params
    }
}

fn param_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Options accepted by picker initialization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitOptions {
    #[serde(default)]
    pub domain: Option<String>,
}

impl InitOptions {
    pub fn with_domain(domain: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
        }
    }
}
