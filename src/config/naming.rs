//! Room and participant naming configuration.

use regex::Regex;
use std::{env, sync::LazyLock};

pub const DEFAULT_ROOM_PREFIX: &str = "edy";
pub const DEFAULT_PARTICIPANT_PREFIX: &str = "user";

/// Prefixes end up inside room names and identities, so keep them to a
/// conservative character set.
static PREFIX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9_-]*$").expect("prefix pattern is valid"));

/// Prefixes used when generating room names and participant identities
#[derive(Clone, Debug)]
pub struct NamingConfig {
    pub room_prefix: String,
    pub participant_prefix: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            room_prefix: DEFAULT_ROOM_PREFIX.to_string(),
            participant_prefix: DEFAULT_PARTICIPANT_PREFIX.to_string(),
        }
    }
}

impl NamingConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            room_prefix: prefix_from_env("ROOM_NAME_PREFIX", DEFAULT_ROOM_PREFIX),
            participant_prefix: prefix_from_env("PARTICIPANT_PREFIX", DEFAULT_PARTICIPANT_PREFIX),
        }
    }
}

/// Check that a prefix only uses lowercase letters, digits, `_` and `-`
pub fn is_valid_prefix(prefix: &str) -> bool {
    PREFIX_PATTERN.is_match(prefix)
}

fn prefix_from_env(name: &str, default: &str) -> String {
    match env::var(name) {
        Ok(value) if is_valid_prefix(&value) => value,
        Ok(value) => {
            tracing::warn!(
                variable = name,
                value = %value,
                fallback = default,
                "Ignoring invalid name prefix"
            );
            default.to_string()
        }
        Err(_) => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ENV_MUTEX;

    #[test]
    fn test_prefix_validation() {
        assert!(is_valid_prefix("edy"));
        assert!(is_valid_prefix("room_2"));
        assert!(is_valid_prefix("a-b"));
        assert!(!is_valid_prefix(""));
        assert!(!is_valid_prefix("-edy"));
        assert!(!is_valid_prefix("Edy"));
        assert!(!is_valid_prefix("edy room"));
    }

    #[test]
    fn test_invalid_prefix_falls_back_to_default() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe {
            env::set_var("ROOM_NAME_PREFIX", "Bad Prefix");
            env::set_var("PARTICIPANT_PREFIX", "guest");
        }

        let config = NamingConfig::from_env();

        unsafe {
            env::remove_var("ROOM_NAME_PREFIX");
            env::remove_var("PARTICIPANT_PREFIX");
        }

        assert_eq!(config.room_prefix, DEFAULT_ROOM_PREFIX);
        assert_eq!(config.participant_prefix, "guest");
    }
}
