use super::model::{non_empty, Config};

pub const PLACEHOLDER_URL: &str = "https://placeholder.supabase.co";
pub const PLACEHOLDER_KEY: &str = "placeholder";

/// Resolved hosted-backend connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSettings {
    pub url: String,
    pub key: String,
}

impl RemoteSettings {
    /// Stored config first, then `SUPABASE_URL`/`SUPABASE_KEY`, then placeholders.
    pub fn resolve(config: &Config) -> Self {
        Self::resolve_with(config, |name| std::env::var(name).ok())
    }

    pub fn resolve_with(config: &Config, env: impl Fn(&str) -> Option<String>) -> Self {
        let url = non_empty(config.supabase_url.clone())
            .or_else(|| non_empty(env("SUPABASE_URL")))
            .unwrap_or_else(|| PLACEHOLDER_URL.to_string());
        let key = non_empty(config.supabase_key.clone())
            .or_else(|| non_empty(env("SUPABASE_KEY")))
            .unwrap_or_else(|| PLACEHOLDER_KEY.to_string());
        Self {
            url: format_url(&url),
            key,
        }
    }

    /// Whether these settings point at a real hosted project.
    pub fn is_configured(&self) -> bool {
        self.url.contains("supabase.co") && self.url != PLACEHOLDER_URL && self.key != PLACEHOLDER_KEY
    }
}

/// Adds `https://` to URLs given without a scheme.
pub fn format_url(url: &str) -> String {
    if url.is_empty() || url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }
    format!("https://{url}")
}
