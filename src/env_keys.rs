// ============================================================================
// ENV KEYS - the compile-time settings AppConfig reads
// ============================================================================
// Std only: build.rs includes this file to check .env before forwarding it.
// ============================================================================

/// Every key `AppConfig::from_env` looks up
pub const ENV_KEYS: &[&str] = &[
    "POCKETBASE_URL",
    "ENVIRONMENT",
    "ENABLE_LOGGING",
    "LOG_LEVEL",
    "USERS_COLLECTION",
    "POSTS_COLLECTION",
    "FILES_COLLECTION",
    "AUTH_STORAGE_KEY",
    "FAILED_UPLOAD_POLICY",
];

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];
const UPLOAD_POLICIES: &[&str] = &["retain", "evict"];

/// Checks one `.env` entry; the error says why the app would fall back to its default
pub fn check(key: &str, value: &str) -> Result<(), String> {
    if !ENV_KEYS.contains(&key) {
        return Err(format!("unknown key {}, the app never reads it", key));
    }

    let value = value.trim();
    if value.is_empty() {
        return Err(format!("{} is empty, the default will be used", key));
    }

    let one_of = |allowed: &[&str], case_insensitive: bool| {
        let found = if case_insensitive {
            allowed.iter().any(|a| a.eq_ignore_ascii_case(value))
        } else {
            allowed.contains(&value)
        };
        if found {
            Ok(())
        } else {
            Err(format!("{}={} is not one of {}, the default will be used", key, value, allowed.join(" | ")))
        }
    };

    match key {
        "ENABLE_LOGGING" => one_of(&["true", "false"], false),
        "LOG_LEVEL" => one_of(LOG_LEVELS, true),
        "FAILED_UPLOAD_POLICY" => one_of(UPLOAD_POLICIES, true),
        "POCKETBASE_URL" if !value.starts_with("http://") && !value.starts_with("https://") => {
            Err(format!("POCKETBASE_URL={} should start with http:// or https://", value))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_env_example_lists_every_key() {
        let listed: Vec<&str> = include_str!("../.env.example")
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once('=').map(|(key, _)| key.trim()))
            .collect();

        assert_eq!(listed, ENV_KEYS);
    }

    #[test]
    fn test_env_example_values_pass() {
        for line in include_str!("../.env.example").lines().map(str::trim) {
            if let Some((key, value)) = line.split_once('=').filter(|_| !line.starts_with('#')) {
                assert_eq!(check(key.trim(), value), Ok(()), "{}", line);
            }
        }
    }

    #[test]
    fn test_accepted_values_are_the_ones_config_parses() {
        let config = AppConfig::from_lookup(|key| match key {
            "ENABLE_LOGGING" => Some("false"),
            "LOG_LEVEL" => Some("TRACE"),
            "FAILED_UPLOAD_POLICY" => Some("Evict"),
            _ => None,
        });
        assert!(check("ENABLE_LOGGING", "false").is_ok());
        assert!(check("LOG_LEVEL", "TRACE").is_ok());
        assert!(check("FAILED_UPLOAD_POLICY", "Evict").is_ok());

        assert!(!config.enable_logging);
        assert_eq!(config.log_level, log::Level::Trace);
        assert_eq!(config.failed_upload_policy, crate::state::FailedUploadPolicy::Evict);
    }

    #[test]
    fn test_rejected_values() {
        assert!(check("POCKETBASE_ULR", "http://pb.local").is_err());
        assert!(check("ENABLE_LOGGING", "yes").is_err());
        assert!(check("ENABLE_LOGGING", "TRUE").is_err());
        assert!(check("LOG_LEVEL", "loud").is_err());
        assert!(check("FAILED_UPLOAD_POLICY", "shred").is_err());
        assert!(check("POCKETBASE_URL", "pb.local:8090").is_err());
        assert!(check("USERS_COLLECTION", "  ").is_err());
    }
}
