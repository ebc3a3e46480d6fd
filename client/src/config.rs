//! Client configuration: where the hosted backend lives and which public key
//! to present.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Connection settings for the hosted auth + functions backend.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Project base URL, without a trailing slash.
    pub supabase_url: String,
    /// Public (anon) API key.
    pub anon_key: String,
}

impl ClientConfig {
    #[must_use]
    pub fn new(supabase_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let supabase_url = supabase_url.into();
        Self { supabase_url: supabase_url.trim_end_matches('/').to_owned(), anon_key: anon_key.into() }
    }

    /// Read `SUPABASE_URL` / `SUPABASE_ANON_KEY` through `lookup`.
    ///
    /// Missing values become empty strings; every backend call then fails at
    /// the provider instead of at startup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let url = lookup("SUPABASE_URL").unwrap_or_default();
        let key = lookup("SUPABASE_ANON_KEY").unwrap_or_default();
        if url.is_empty() || key.is_empty() {
            log::warn!("SUPABASE_URL or SUPABASE_ANON_KEY not set; auth and functions will fail");
        }
        Self::new(url, key)
    }

    /// Values baked in at compile time, for the browser build.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| match key {
            "SUPABASE_URL" => option_env!("SUPABASE_URL").map(str::to_owned),
            "SUPABASE_ANON_KEY" => option_env!("SUPABASE_ANON_KEY").map(str::to_owned),
            _ => None,
        })
    }

    #[must_use]
    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1{path}", self.supabase_url)
    }

    #[must_use]
    pub fn function_url(&self, name: &str) -> String {
        format!("{}{}", self.supabase_url, contracts::function_path(name))
    }
}
