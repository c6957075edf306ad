//! Navigation interception for the embedded picker

use serde_json::Value;
use url::Url;

use scl_deferred::{Deferred, Promise};
use scl_protocol::{PickerError, ResultMessage};

use crate::config::EmbedConfig;
use crate::error::EmbedError;
use crate::Result;

/// Resolves with the `file selected` message, rejects with `popup closed`
/// if the view is dismissed first.
pub type SelectionPromise = Promise<ResultMessage, ResultMessage>;

/// Decode a selection query: a URL-encoded JSON document
pub fn decode_selection(query: &str) -> Result<Value> {
    let decoded = urlencoding::decode(query)?;
    Ok(serde_json::from_str(&decoded)?)
}

/// Shell-side state for one embedded picker page
pub struct EmbeddedPickerView {
    config: EmbedConfig,
    selection: Deferred<ResultMessage, ResultMessage>,
}

impl EmbeddedPickerView {
    pub fn new(config: EmbedConfig) -> Self {
        Self {
            config,
            selection: Deferred::new(),
        }
    }

    pub fn config(&self) -> &EmbedConfig {
        &self.config
    }

    pub fn load_url(&self) -> Result<Url> {
        self.config.load_url()
    }

    pub fn promise(&self) -> SelectionPromise {
        self.selection.promise()
    }

    /// Whether `url` is the picker's completion signal
    pub fn is_selected_file(&self, url: &Url) -> bool {
        url.scheme().starts_with(&self.config.redirect_scheme)
    }

    /// Navigation policy hook for the web view.
    ///
    /// Returns false for completion navigations, which are consumed here and
    /// must not be followed. Everything else loads normally.
    pub fn should_start_load(&self, url: &Url) -> bool {
        if !self.is_selected_file(url) {
            return true;
        }

        match self.intercept(url) {
            Ok(message) => {
                if !self.selection.resolve(message) {
                    tracing::debug!(url = %url, "Selection already delivered");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, url = %url, "Unreadable selection navigation");
            }
        }
        false
    }

    /// The user left the picker without choosing anything
    pub fn dismiss(&self) -> bool {
        self.selection.reject(PickerError::PopupClosed.into())
    }

    fn intercept(&self, url: &Url) -> Result<ResultMessage> {
        let query = url.query().ok_or(EmbedError::MissingQuery)?;
        let data = decode_selection(query)?;
        tracing::info!("Picker selection received");
        Ok(ResultMessage::file_selected(data))
    }
}

impl Default for EmbeddedPickerView {
    fn default() -> Self {
        Self::new(EmbedConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scl_deferred::{DeferredState, Settlement};
    use serde_json::json;

    fn selection_url(data: &Value) -> Url {
        let encoded = urlencoding::encode(&data.to_string()).into_owned();
        Url::parse(&format!("scl-file-selected://done?{}", encoded)).unwrap()
    }

    #[test]
    fn test_ordinary_navigation_loads() {
        let view = EmbeddedPickerView::default();
        let url = Url::parse("https://dev5.airwatchdev.com/MyDevice/ContentPicker/folder/2").unwrap();

        assert!(view.should_start_load(&url));
        assert!(view.promise().is_pending());
    }

    #[test]
    fn test_selection_is_intercepted() {
        let view = EmbeddedPickerView::default();
        let data = json!({ "id": 42, "name": "report.pdf" });

        assert!(!view.should_start_load(&selection_url(&data)));
        assert_eq!(
            view.promise().settlement(),
            Some(Settlement::Resolved(ResultMessage::file_selected(data)))
        );
    }

    #[test]
    fn test_selection_settles_once() {
        let view = EmbeddedPickerView::default();
        view.should_start_load(&selection_url(&json!(1)));
        view.should_start_load(&selection_url(&json!(2)));
        assert!(!view.dismiss());

        let message = view.promise().settlement().and_then(|s| s.value().cloned());
        assert_eq!(message.and_then(|m| m.data), Some(json!(1)));
    }

    #[test]
    fn test_scheme_prefix_matches() {
        let view = EmbeddedPickerView::default();
        let url = Url::parse("scl-file-selected-v2:x").unwrap();
        assert!(view.is_selected_file(&url));
        assert!(!view.is_selected_file(&Url::parse("https://scl-file-selected.example").unwrap()));
    }

    #[test]
    fn test_malformed_selection_still_intercepted() {
        let view = EmbeddedPickerView::default();

        let no_query = Url::parse("scl-file-selected://done").unwrap();
        assert!(!view.should_start_load(&no_query));

        let not_json = Url::parse("scl-file-selected://done?%7Bbroken").unwrap();
        assert!(!view.should_start_load(&not_json));

        assert_eq!(view.promise().state(), DeferredState::Pending);
    }

    #[test]
    fn test_dismiss_rejects() {
        let view = EmbeddedPickerView::default();
        assert!(view.dismiss());

        let reason = view.promise().settlement().and_then(|s| s.reason().cloned());
        assert_eq!(reason.map(|m| m.status), Some(-5));
    }

    #[test]
    fn test_decode_selection() {
        assert_eq!(
            decode_selection("%5B%22a%22%2C%22b%22%5D").unwrap(),
            json!(["a", "b"])
        );
        assert!(matches!(decode_selection("%ZZ"), Err(EmbedError::Json(_))));
    }
}
