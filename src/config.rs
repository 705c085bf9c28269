// ============================================================================
// APP CONFIG - resolved at compile time (build.rs forwards .env)
// ============================================================================

use std::str::FromStr;

use crate::state::FailedUploadPolicy;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub pocketbase_url: String,
    pub environment: String,
    pub enable_logging: bool,
    pub log_level: log::Level,
    pub users_collection: String,
    pub posts_collection: String,
    pub files_collection: String,
    pub auth_storage_key: String,
    pub failed_upload_policy: FailedUploadPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pocketbase_url: "http://127.0.0.1:8090".to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            log_level: log::Level::Info,
            users_collection: "users".to_string(),
            posts_collection: "posts".to_string(),
            files_collection: "files".to_string(),
            auth_storage_key: "pocketbase_auth".to_string(),
            failed_upload_policy: FailedUploadPolicy::Retain,
        }
    }
}

impl AppConfig {
    /// Loads the configuration from compile-time environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| match key {
            "POCKETBASE_URL" => option_env!("POCKETBASE_URL"),
            "ENVIRONMENT" => option_env!("ENVIRONMENT"),
            "ENABLE_LOGGING" => option_env!("ENABLE_LOGGING"),
            "LOG_LEVEL" => option_env!("LOG_LEVEL"),
            "USERS_COLLECTION" => option_env!("USERS_COLLECTION"),
            "POSTS_COLLECTION" => option_env!("POSTS_COLLECTION"),
            "FILES_COLLECTION" => option_env!("FILES_COLLECTION"),
            "AUTH_STORAGE_KEY" => option_env!("AUTH_STORAGE_KEY"),
            "FAILED_UPLOAD_POLICY" => option_env!("FAILED_UPLOAD_POLICY"),
            _ => None,
        })
    }

    /// Builds a config from any key lookup; missing or unparseable values keep the default
    pub fn from_lookup<'a>(lookup: impl Fn(&str) -> Option<&'a str>) -> Self {
        let defaults = Self::default();
        let text = |key: &str, fallback: String| {
            lookup(key)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .unwrap_or(fallback)
        };
        let parsed = |key: &str| lookup(key).map(str::trim).filter(|v| !v.is_empty());

        Self {
            pocketbase_url: text("POCKETBASE_URL", defaults.pocketbase_url),
            environment: text("ENVIRONMENT", defaults.environment),
            enable_logging: parsed("ENABLE_LOGGING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enable_logging),
            log_level: parsed("LOG_LEVEL")
                .and_then(|v| log::Level::from_str(v).ok())
                .unwrap_or(defaults.log_level),
            users_collection: text("USERS_COLLECTION", defaults.users_collection),
            posts_collection: text("POSTS_COLLECTION", defaults.posts_collection),
            files_collection: text("FILES_COLLECTION", defaults.files_collection),
            auth_storage_key: text("AUTH_STORAGE_KEY", defaults.auth_storage_key),
            failed_upload_policy: parsed("FAILED_UPLOAD_POLICY")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.failed_upload_policy),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_values_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_values_are_read_and_trimmed() {
        let config = AppConfig::from_lookup(|key| match key {
            "POCKETBASE_URL" => Some(" https://pb.example.com "),
            "ENVIRONMENT" => Some("production"),
            "ENABLE_LOGGING" => Some("false"),
            "LOG_LEVEL" => Some("debug"),
            "FAILED_UPLOAD_POLICY" => Some("evict"),
            _ => None,
        });

        assert_eq!(config.pocketbase_url, "https://pb.example.com");
        assert!(config.is_production());
        assert!(!config.enable_logging);
        assert_eq!(config.log_level, log::Level::Debug);
        assert_eq!(config.failed_upload_policy, FailedUploadPolicy::Evict);
        assert_eq!(config.files_collection, "files");
    }

    #[test]
    fn test_garbage_values_keep_defaults() {
        let config = AppConfig::from_lookup(|key| match key {
            "ENABLE_LOGGING" => Some("maybe"),
            "LOG_LEVEL" => Some("loud"),
            "FAILED_UPLOAD_POLICY" => Some("shred"),
            _ => None,
        });

        assert!(config.enable_logging);
        assert_eq!(config.log_level, log::Level::Info);
        assert_eq!(config.failed_upload_policy, FailedUploadPolicy::Retain);
    }
}
