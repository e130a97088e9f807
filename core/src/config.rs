//! Where the page finds its API.

use crate::client::TodoClient;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const API_URL_ENV: &str = "TODO_API_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Read `TODO_API_URL`, falling back to the default when unset or blank.
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(API_URL_ENV).ok())
    }

    fn from_value(value: Option<String>) -> Self {
        match value {
            Some(url) if !url.trim().is_empty() => Self {
                base_url: url.trim().to_string(),
            },
            _ => Self::default(),
        }
    }

    pub fn client(&self) -> TodoClient {
        TodoClient::new(&self.base_url)
    }
}
