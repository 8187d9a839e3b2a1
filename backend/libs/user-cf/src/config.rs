use crate::error::{RecommendError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const DEFAULT_NUM_SIMILAR_USERS: usize = 3;
const DEFAULT_NUM_RECOMMENDATIONS: usize = 5;
const DEFAULT_TARGET_USER: &str = "U5";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommenderConfig {
    /// Neighbors considered per request (k).
    #[serde(default = "default_num_similar_users")]
    pub num_similar_users: usize,
    /// Items returned per request (n).
    #[serde(default = "default_num_recommendations")]
    pub num_recommendations: usize,
    #[serde(default = "default_target_user")]
    pub target_user: String,
    /// JSON dataset to load; the reference data is used when unset.
    #[serde(default)]
    pub dataset_path: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            num_similar_users: default_num_similar_users(),
            num_recommendations: default_num_recommendations(),
            target_user: default_target_user(),
            dataset_path: None,
            log_level: default_log_level(),
        }
    }
}

impl RecommenderConfig {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            num_similar_users: parse_env_or(
                "RECOMMEND_NUM_SIMILAR_USERS",
                default_num_similar_users(),
            )?,
            num_recommendations: parse_env_or(
                "RECOMMEND_NUM_RECOMMENDATIONS",
                default_num_recommendations(),
            )?,
            target_user: std::env::var("RECOMMEND_TARGET_USER")
                .unwrap_or_else(|_| default_target_user()),
            dataset_path: std::env::var("RECOMMEND_DATASET_PATH")
                .ok()
                .filter(|path| !path.trim().is_empty()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| default_log_level()),
        })
    }
}

/// Missing variables fall back to `default`; present but unparsable ones are errors.
fn parse_env_or<T: FromStr>(key: &str, default: T) -> Result<T> {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            RecommendError::Configuration(format!("{} has invalid value {:?}", key, raw))
        }),
        Err(_) => Ok(default),
    }
}

fn default_num_similar_users() -> usize {
    DEFAULT_NUM_SIMILAR_USERS
}

fn default_num_recommendations() -> usize {
    DEFAULT_NUM_RECOMMENDATIONS
}

fn default_target_user() -> String {
    DEFAULT_TARGET_USER.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 5] = [
        "RECOMMEND_NUM_SIMILAR_USERS",
        "RECOMMEND_NUM_RECOMMENDATIONS",
        "RECOMMEND_TARGET_USER",
        "RECOMMEND_DATASET_PATH",
        "LOG_LEVEL",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env_defaults() {
        clear_env();

        let config = RecommenderConfig::from_env().unwrap();
        assert_eq!(config, RecommenderConfig::default());
        assert_eq!(config.num_similar_users, 3);
        assert_eq!(config.num_recommendations, 5);
        assert_eq!(config.target_user, "U5");
        assert!(config.dataset_path.is_none());
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("RECOMMEND_NUM_SIMILAR_USERS", "10");
        std::env::set_var("RECOMMEND_NUM_RECOMMENDATIONS", " 20 ");
        std::env::set_var("RECOMMEND_TARGET_USER", "U1");
        std::env::set_var("RECOMMEND_DATASET_PATH", "/tmp/data.json");

        let config = RecommenderConfig::from_env().unwrap();
        assert_eq!(config.num_similar_users, 10);
        assert_eq!(config.num_recommendations, 20);
        assert_eq!(config.target_user, "U1");
        assert_eq!(config.dataset_path.as_deref(), Some("/tmp/data.json"));

        clear_env();
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env_rejects_invalid_number() {
        clear_env();
        std::env::set_var("RECOMMEND_NUM_SIMILAR_USERS", "-3");

        let err = RecommenderConfig::from_env().unwrap_err();
        assert!(matches!(err, RecommendError::Configuration(_)));

        clear_env();
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: RecommenderConfig =
            serde_json::from_str(r#"{"num_recommendations": 2}"#).unwrap();
        assert_eq!(config.num_recommendations, 2);
        assert_eq!(config.num_similar_users, 3);
        assert_eq!(config.log_level, "info");
    }
}
