//! Configuration management for the listing service.
//!
//! All settings are loaded from environment variables with development
//! defaults; production deployments must set the guarded values explicitly.
use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub cors: CorsConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

/// Application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// RSA public key for validating access tokens (PEM format,
    /// base64-encoded in the environment variable). Token issuance lives in
    /// the external auth service; this service only validates.
    pub public_key_pem: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| default_app_env());

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: std::env::var("LISTING_SERVICE_HOST")
                    .unwrap_or_else(|_| default_app_host()),
                port: std::env::var("LISTING_SERVICE_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or_else(default_app_port),
            },
            cors: {
                let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
                    Ok(value) => value,
                    Err(_) if app_env.eq_ignore_ascii_case("production") => {
                        return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                    }
                    Err(_) => "http://localhost:3000".to_string(),
                };

                if app_env.eq_ignore_ascii_case("production") && allowed_origins.trim() == "*" {
                    return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
                }

                CorsConfig { allowed_origins }
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/marketboard".to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or_else(default_db_max_connections),
            },
            jwt: {
                let public_key_pem = match std::env::var("JWT_PUBLIC_KEY_PEM") {
                    Ok(encoded) => {
                        let decoded = general_purpose::STANDARD
                            .decode(encoded.trim())
                            .map_err(|e| format!("Failed to decode JWT_PUBLIC_KEY_PEM: {}", e))?;
                        let pem = String::from_utf8(decoded)
                            .map_err(|_| "JWT_PUBLIC_KEY_PEM is not valid UTF-8".to_string())?;
                        Some(pem)
                    }
                    Err(_) if app_env.eq_ignore_ascii_case("production") => {
                        return Err("JWT_PUBLIC_KEY_PEM must be set in production".to_string())
                    }
                    Err(_) => None,
                };

                JwtConfig { public_key_pem }
            },
        })
    }

    pub fn is_production(&self) -> bool {
        self.app.env == "production"
    }
}

// Default value functions
fn default_app_env() -> String {
    "development".to_string()
}

fn default_app_host() -> String {
    "0.0.0.0".to_string()
}

fn default_app_port() -> u16 {
    8080
}

fn default_db_max_connections() -> u32 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_app_env(), "development");
        assert_eq!(default_app_host(), "0.0.0.0");
        assert_eq!(default_app_port(), 8080);
        assert_eq!(default_db_max_connections(), 20);
    }
}
