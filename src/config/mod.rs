//! Persistent user settings and the rules for resolving them against the
//! environment.

pub mod manager;
pub mod model;
pub mod remote;

pub use manager::ConfigManager;
pub use model::{Config, DEFAULT_GEMINI_MODEL};
pub use remote::{format_url, RemoteSettings};
