use std::env;

use crate::env_or;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub log_level: String,
    /// Request metrics and the `/metrics` endpoint
    pub observability_enabled: bool,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            port: env_or("PORT", 3000),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            observability_enabled: env::var("OBSERVABILITY_ENABLED")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    let value = value.trim().to_lowercase();
    value != "false" && value != "0" && value != "off"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(" FALSE "));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("off"));
    }
}
