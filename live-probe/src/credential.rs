//! API credentials and where to find them.

use secrecy::{ExposeSecret, SecretString};

/// Environment variables consulted by default, in order.
pub const DEFAULT_ENV_VARS: &[&str] = &["GOOGLE_API_KEY", "GEMINI_API_KEY"];

/// An opaque API key. The value never appears in `Debug` output.
#[derive(Debug, Clone)]
pub struct Credential {
    key: SecretString,
    source: String,
}

impl Credential {
    /// Wrap a key obtained from `source` (an env var name, `--api-key`, ...).
    pub fn new(key: impl Into<String>, source: impl Into<String>) -> Self {
        Self { key: SecretString::from(key.into()), source: source.into() }
    }

    /// Where the key came from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether the key is empty after trimming.
    pub fn is_empty(&self) -> bool {
        self.key.expose_secret().trim().is_empty()
    }

    /// The raw key, for placing on the wire.
    pub fn expose(&self) -> &str {
        self.key.expose_secret().trim()
    }

    /// Masked form for display: first 10 chars, `...`, last 4.
    pub fn masked(&self) -> String {
        mask_key(self.expose())
    }
}

/// Mask a key as `AIzaSyA123...wxyz`. Keys too short to mask safely are fully hidden.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 14 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..10].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Ordered list of environment variables to read a credential from.
#[derive(Debug, Clone)]
pub struct CredentialSource {
    env_vars: Vec<String>,
}

impl Default for CredentialSource {
    fn default() -> Self {
        Self::new(DEFAULT_ENV_VARS.iter().copied())
    }
}

impl CredentialSource {
    /// Look up `env_vars` in order.
    pub fn new<I, S>(env_vars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { env_vars: env_vars.into_iter().map(Into::into).collect() }
    }

    /// Variable names, in lookup order.
    pub fn env_vars(&self) -> &[String] {
        &self.env_vars
    }

    /// First non-empty value among the configured variables.
    pub fn resolve_with<F>(&self, lookup: F) -> Option<Credential>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.env_vars.iter().find_map(|name| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .map(|value| Credential::new(value, name.as_str()))
        })
    }

    /// Resolve from the process environment.
    pub fn resolve(&self) -> Option<Credential> {
        self.resolve_with(|name| std::env::var(name).ok())
    }
}
