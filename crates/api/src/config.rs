//! Application configuration loaded from environment variables.

use std::time::Duration;

use backends::http::DEFAULT_TIMEOUT;

/// Gateway configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `8080`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `RESERVATION_SERVICE_URL` — default `http://localhost:8070`
/// - `PAYMENT_SERVICE_URL` — default `http://localhost:8060`
/// - `LOYALTY_SERVICE_URL` — default `http://localhost:8050`
/// - `BACKEND_TIMEOUT_SECS` — per-call timeout (default: 10)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub reservation_service_url: String,
    pub payment_service_url: String,
    pub loyalty_service_url: String,
    pub backend_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            reservation_service_url: std::env::var("RESERVATION_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8070".to_string()),
            payment_service_url: std::env::var("PAYMENT_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8060".to_string()),
            loyalty_service_url: std::env::var("LOYALTY_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8050".to_string()),
            backend_timeout: std::env::var("BACKEND_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            reservation_service_url: "http://localhost:8070".to_string(),
            payment_service_url: "http://localhost:8060".to_string(),
            loyalty_service_url: "http://localhost:8050".to_string(),
            backend_timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.reservation_service_url, "http://localhost:8070");
        assert_eq!(config.payment_service_url, "http://localhost:8060");
        assert_eq!(config.loyalty_service_url, "http://localhost:8050");
        assert_eq!(config.backend_timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.backend_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_addr_formatting() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..Config::default()
        };
        assert_eq!(config.addr(), "127.0.0.1:8080");
    }
}
