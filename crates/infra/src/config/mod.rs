//! Configuration loading
//!
//! Builds a [`ClientConfig`](placetopay_domain::ClientConfig) from
//! environment variables or a config file.

pub mod loader;

// Re-export commonly used items
pub use loader::{find_config_file, load, load_from_env, load_from_file};
