//! LiveKit credentials and token lifetime configuration.

use crate::errors::TokenError;
use std::env;
use url::Url;

pub const API_KEY_VAR: &str = "LIVEKIT_API_KEY";
pub const API_SECRET_VAR: &str = "LIVEKIT_API_SECRET";
pub const URL_VAR: &str = "LIVEKIT_URL";
pub const TOKEN_TTL_VAR: &str = "LIVEKIT_TOKEN_TTL_SECONDS";

/// Matches the server SDK default of six hours.
pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 6 * 60 * 60;

/// Upper bound on token lifetime. Far below anything that could overflow
/// when the SDK adds it to the current time.
pub const MAX_TOKEN_TTL_SECONDS: u64 = 30 * 24 * 60 * 60;

const ALLOWED_URL_SCHEMES: &[&str] = &["ws", "wss", "http", "https"];

/// Raw LiveKit configuration as read from the environment.
///
/// Values are kept optional so the server can start without them; a missing
/// value only fails the token request that needs it.
#[derive(Clone, Debug)]
pub struct LiveKitConfig {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub url: Option<String>,
    pub token_ttl_seconds: u64,
}

impl Default for LiveKitConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_secret: None,
            url: None,
            token_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
        }
    }
}

/// Validated credentials needed to sign a token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiveKitCredentials {
    pub api_key: String,
    pub api_secret: String,
    pub url: String,
}

impl LiveKitConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let token_ttl_seconds = match env::var(TOKEN_TTL_VAR).ok().map(|v| v.parse::<u64>()) {
            Some(Ok(ttl)) if is_valid_token_ttl(ttl) => ttl,
            Some(_) => {
                tracing::warn!(
                    variable = TOKEN_TTL_VAR,
                    max = MAX_TOKEN_TTL_SECONDS,
                    fallback = DEFAULT_TOKEN_TTL_SECONDS,
                    "Ignoring invalid token TTL"
                );
                DEFAULT_TOKEN_TTL_SECONDS
            }
            None => DEFAULT_TOKEN_TTL_SECONDS,
        };

        Self {
            api_key: non_empty_var(API_KEY_VAR),
            api_secret: non_empty_var(API_SECRET_VAR),
            url: non_empty_var(URL_VAR),
            token_ttl_seconds,
        }
    }

    /// Build a config from explicit values. Blank strings count as missing.
    pub fn with_credentials(api_key: &str, api_secret: &str, url: &str) -> Self {
        Self {
            api_key: non_empty(api_key),
            api_secret: non_empty(api_secret),
            url: non_empty(url),
            ..Self::default()
        }
    }

    pub fn with_token_ttl(mut self, seconds: u64) -> Self {
        self.token_ttl_seconds = seconds;
        self
    }

    /// Names of the required variables that are not set.
    pub fn missing_variables(&self) -> Vec<&'static str> {
        [
            (API_KEY_VAR, &self.api_key),
            (API_SECRET_VAR, &self.api_secret),
            (URL_VAR, &self.url),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name)
        .collect()
    }

    /// Resolve the three required values, or report which ones are missing.
    pub fn credentials(&self) -> Result<LiveKitCredentials, TokenError> {
        let (Some(api_key), Some(api_secret), Some(url)) =
            (&self.api_key, &self.api_secret, &self.url)
        else {
            return Err(TokenError::MissingConfiguration(
                self.missing_variables().join(", "),
            ));
        };

        validate_service_url(url)?;

        if !is_valid_token_ttl(self.token_ttl_seconds) {
            return Err(TokenError::InvalidTokenTtl(self.token_ttl_seconds));
        }

        Ok(LiveKitCredentials {
            api_key: api_key.clone(),
            api_secret: api_secret.clone(),
            url: url.clone(),
        })
    }
}

/// The service URL is echoed to clients verbatim, but it has to be
/// something they can connect to.
fn validate_service_url(raw: &str) -> Result<(), TokenError> {
    let parsed = Url::parse(raw).map_err(|e| TokenError::InvalidUrl(format!("{raw}: {e}")))?;

    if !ALLOWED_URL_SCHEMES.contains(&parsed.scheme()) {
        return Err(TokenError::InvalidUrl(format!(
            "{raw}: unsupported scheme '{}'",
            parsed.scheme()
        )));
    }

    Ok(())
}

pub fn is_valid_token_ttl(seconds: u64) -> bool {
    (1..=MAX_TOKEN_TTL_SECONDS).contains(&seconds)
}

/// Blank values count as missing; anything else is kept exactly as given.
fn non_empty(value: &str) -> Option<String> {
    (!value.trim().is_empty()).then(|| value.to_string())
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().and_then(|v| non_empty(&v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ENV_MUTEX;

    fn clear_env() {
        unsafe {
            env::remove_var(API_KEY_VAR);
            env::remove_var(API_SECRET_VAR);
            env::remove_var(URL_VAR);
            env::remove_var(TOKEN_TTL_VAR);
        }
    }

    #[test]
    fn test_from_env_reads_all_values() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(API_KEY_VAR, "APIkey123");
            env::set_var(API_SECRET_VAR, "s3cret");
            env::set_var(URL_VAR, "wss://example.livekit.cloud");
            env::set_var(TOKEN_TTL_VAR, "600");
        }

        let config = LiveKitConfig::from_env();
        clear_env();

        assert_eq!(config.api_key.as_deref(), Some("APIkey123"));
        assert_eq!(config.api_secret.as_deref(), Some("s3cret"));
        assert_eq!(config.url.as_deref(), Some("wss://example.livekit.cloud"));
        assert_eq!(config.token_ttl_seconds, 600);
        assert!(config.credentials().is_ok());
    }

    #[test]
    fn test_empty_values_count_as_missing() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(API_KEY_VAR, "");
            env::set_var(API_SECRET_VAR, "s3cret");
            env::set_var(TOKEN_TTL_VAR, "not-a-number");
        }

        let config = LiveKitConfig::from_env();
        clear_env();

        assert_eq!(config.api_key, None);
        assert_eq!(config.token_ttl_seconds, DEFAULT_TOKEN_TTL_SECONDS);
        assert_eq!(config.missing_variables(), vec![API_KEY_VAR, URL_VAR]);
    }

    #[test]
    fn test_oversized_ttl_from_env_falls_back_to_default() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(TOKEN_TTL_VAR, u64::MAX.to_string());
        }

        let config = LiveKitConfig::from_env();
        clear_env();

        assert_eq!(config.token_ttl_seconds, DEFAULT_TOKEN_TTL_SECONDS);
    }

    #[test]
    fn test_out_of_range_ttl_is_a_configuration_error() {
        let base = LiveKitConfig::with_credentials("key", "secret", "wss://host.example");

        assert!(base.clone().with_token_ttl(MAX_TOKEN_TTL_SECONDS).credentials().is_ok());
        assert!(matches!(
            base.clone().with_token_ttl(u64::MAX).credentials(),
            Err(TokenError::InvalidTokenTtl(u64::MAX))
        ));
        assert!(matches!(
            base.with_token_ttl(0).credentials(),
            Err(TokenError::InvalidTokenTtl(0))
        ));
    }

    #[test]
    fn test_values_are_kept_verbatim() {
        let config = LiveKitConfig::with_credentials("key", "secret", "wss://x.example ");
        let credentials = config.credentials().unwrap();
        assert_eq!(credentials.url, "wss://x.example ");

        let blank = LiveKitConfig::with_credentials("   ", "secret", "wss://x.example");
        assert_eq!(blank.missing_variables(), vec![API_KEY_VAR]);
    }

    #[test]
    fn test_missing_configuration_names_variables() {
        let config = LiveKitConfig::with_credentials("key", "", "wss://host");

        match config.credentials() {
            Err(TokenError::MissingConfiguration(missing)) => {
                assert_eq!(missing, API_SECRET_VAR);
            }
            other => panic!("expected missing configuration, got {other:?}"),
        }
    }

    #[test]
    fn test_url_scheme_is_checked() {
        let ok = LiveKitConfig::with_credentials("key", "secret", "https://host.example");
        assert!(ok.credentials().is_ok());

        let bad_scheme = LiveKitConfig::with_credentials("key", "secret", "ftp://host.example");
        assert!(matches!(
            bad_scheme.credentials(),
            Err(TokenError::InvalidUrl(_))
        ));

        let not_a_url = LiveKitConfig::with_credentials("key", "secret", "localhost");
        assert!(matches!(
            not_a_url.credentials(),
            Err(TokenError::InvalidUrl(_))
        ));
    }
}
