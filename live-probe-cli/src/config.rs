use crate::cli::KeyArgs;
use live_probe::{Credential, CredentialSource};

/// Where to look for the key, as given on the command line.
pub struct KeyConfig {
    pub api_key: Option<String>,
    pub source: CredentialSource,
}

impl KeyConfig {
    pub fn from_args(args: &KeyArgs) -> Self {
        Self {
            api_key: args.api_key.clone(),
            source: CredentialSource::new(args.env_vars.iter().cloned()),
        }
    }

    /// `--api-key` wins; otherwise the first non-empty env var.
    pub fn resolve_with<F>(&self, lookup: F) -> Option<Credential>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .map(|key| Credential::new(key, "--api-key"))
            .or_else(|| self.source.resolve_with(lookup))
    }

    pub fn resolve(&self) -> Option<Credential> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    pub fn env_vars(&self) -> &[String] {
        self.source.env_vars()
    }
}

/// Load `.env` from the working directory, if present.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Failed to read .env"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_args(api_key: Option<&str>, env_vars: &[&str]) -> KeyArgs {
        KeyArgs {
            api_key: api_key.map(str::to_string),
            env_vars: env_vars.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_flag_overrides_environment() {
        let config = KeyConfig::from_args(&key_args(Some("flag-key"), &["GOOGLE_API_KEY"]));
        let credential = config.resolve_with(|_| Some("env-key".to_string())).unwrap();
        assert_eq!(credential.expose(), "flag-key");
        assert_eq!(credential.source(), "--api-key");
    }

    #[test]
    fn test_blank_flag_falls_back_to_environment() {
        let config = KeyConfig::from_args(&key_args(Some(" "), &["GEMINI_API_KEY"]));
        let credential = config
            .resolve_with(|name| (name == "GEMINI_API_KEY").then(|| "env-key".to_string()))
            .unwrap();
        assert_eq!(credential.source(), "GEMINI_API_KEY");
    }

    #[test]
    fn test_nothing_configured() {
        let config = KeyConfig::from_args(&key_args(None, &["GOOGLE_API_KEY", "GEMINI_API_KEY"]));
        assert!(config.resolve_with(|_| None).is_none());
        assert_eq!(config.env_vars(), ["GOOGLE_API_KEY", "GEMINI_API_KEY"]);
    }
}
