use std::path::PathBuf;

use crate::model_manager::ModelManager;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5001;

/// Settings for the prediction service.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the model artifacts
    pub models_dir: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            models_dir: ModelManager::get_default_models_dir(),
        }
    }
}

impl ServiceConfig {
    /// `host:port`, bracketing IPv6 hosts.
    pub fn bind_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    pub fn model_manager(&self) -> ModelManager {
        ModelManager::new(&self.models_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:5001");
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_ipv6_bind_addr() {
        let config = ServiceConfig {
            host: "::1".to_string(),
            port: 8080,
            models_dir: PathBuf::from("."),
        };
        assert_eq!(config.bind_addr(), "[::1]:8080");
        assert!(config.bind_addr().parse::<std::net::SocketAddr>().is_ok());
    }

    #[test]
    fn test_model_manager_uses_models_dir() {
        let config = ServiceConfig {
            models_dir: PathBuf::from("/srv/models"),
            ..ServiceConfig::default()
        };
        assert_eq!(config.model_manager().models_dir(), PathBuf::from("/srv/models").as_path());
    }
}
