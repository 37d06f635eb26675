//! Client configuration resolved at build time.
//!
//! The API base URL comes from `HANZI_API_BASE` in the build environment, the
//! same way a bundler bakes `VITE_*` variables into a static bundle. There is
//! no runtime environment in the browser to read from.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Route shown to unauthenticated users.
pub const LOGIN_ROUTE: &str = "/login";
/// Landing route after login and for authenticated visits to `/login`.
pub const DEFAULT_ROUTE: &str = "/study";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
}

impl ClientConfig {
    /// Build config from the compile-time environment.
    ///
    /// Optional:
    /// - `HANZI_API_BASE`: default `http://127.0.0.1:8000`
    pub fn from_env() -> Self {
        Self::from_api_base(option_env!("HANZI_API_BASE"))
    }

    fn from_api_base(raw: Option<&str>) -> Self {
        let api_base = raw
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
            .to_owned();
        Self { api_base }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_api_base(None)
    }
}
