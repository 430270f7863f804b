use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub quote_api_url: String,
    pub rate_fetch_timeout_ms: u64,
    pub prefs_db_path: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let quote_api_url = env_map
            .get("QUOTE_API_URL")
            .cloned()
            .unwrap_or_else(|| "https://api.frankfurter.app".to_string());

        let rate_fetch_timeout_ms = env_map
            .get("RATE_FETCH_TIMEOUT_MS")
            .map(|s| s.as_str())
            .unwrap_or("5000")
            .parse::<u64>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "RATE_FETCH_TIMEOUT_MS".to_string(),
                    "must be a valid u64".to_string(),
                )
            })?;
        if rate_fetch_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue(
                "RATE_FETCH_TIMEOUT_MS".to_string(),
                "must be positive".to_string(),
            ));
        }

        let prefs_db_path = env_map
            .get("PREFS_DB_PATH")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("PREFS_DB_PATH".to_string()))?;

        Ok(Config {
            quote_api_url,
            rate_fetch_timeout_ms,
            prefs_db_path,
        })
    }

    pub fn rate_fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.rate_fetch_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_required_env() -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("PREFS_DB_PATH".to_string(), "/tmp/prefs.db".to_string());
        map
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_env_map(setup_required_env()).unwrap();
        assert_eq!(config.quote_api_url, "https://api.frankfurter.app");
        assert_eq!(config.rate_fetch_timeout_ms, 5000);
        assert_eq!(config.rate_fetch_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_missing_prefs_db_path() {
        let result = Config::from_env_map(HashMap::new());
        match result {
            Err(ConfigError::MissingEnv(s)) => assert_eq!(s, "PREFS_DB_PATH"),
            _ => panic!("Expected MissingEnv error"),
        }
    }

    #[test]
    fn test_invalid_timeout() {
        let mut env_map = setup_required_env();
        env_map.insert(
            "RATE_FETCH_TIMEOUT_MS".to_string(),
            "not_a_number".to_string(),
        );
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "RATE_FETCH_TIMEOUT_MS"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut env_map = setup_required_env();
        env_map.insert("RATE_FETCH_TIMEOUT_MS".to_string(), "0".to_string());
        assert!(Config::from_env_map(env_map).is_err());
    }

    #[test]
    fn test_custom_quote_url() {
        let mut env_map = setup_required_env();
        env_map.insert(
            "QUOTE_API_URL".to_string(),
            "http://localhost:9000".to_string(),
        );
        let config = Config::from_env_map(env_map).unwrap();
        assert_eq!(config.quote_api_url, "http://localhost:9000");
    }
}
