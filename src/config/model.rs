use serde::{Deserialize, Serialize};

use crate::domain::Mode;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Persistent user settings: hosted backend credentials, model access and
/// the mode the shell starts in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supabase_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supabase_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini_api_key: Option<String>,
    #[serde(default = "Config::default_gemini_model")]
    pub gemini_model: String,
    #[serde(default)]
    pub default_mode: Mode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            supabase_url: None,
            supabase_key: None,
            gemini_api_key: None,
            gemini_model: Self::default_gemini_model(),
            default_mode: Mode::default(),
        }
    }
}

impl Config {
    pub fn default_gemini_model() -> String {
        DEFAULT_GEMINI_MODEL.into()
    }

    /// Stores trimmed hosted-backend credentials, adding a scheme to bare hosts.
    pub fn save_remote(&mut self, url: &str, key: &str) {
        self.supabase_url = Some(super::remote::format_url(url.trim()));
        self.supabase_key = Some(key.trim().to_string());
    }

    pub fn clear_remote(&mut self) {
        self.supabase_url = None;
        self.supabase_key = None;
    }

    /// Model key from the config file, then `GEMINI_API_KEY`, then `API_KEY`.
    pub fn resolve_gemini_key(&self) -> Option<String> {
        self.resolve_gemini_key_with(|name| std::env::var(name).ok())
    }

    pub fn resolve_gemini_key_with(&self, env: impl Fn(&str) -> Option<String>) -> Option<String> {
        non_empty(self.gemini_api_key.clone())
            .or_else(|| non_empty(env("GEMINI_API_KEY")))
            .or_else(|| non_empty(env("API_KEY")))
    }
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
