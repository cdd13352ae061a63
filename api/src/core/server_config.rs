use crate::core::app_state::ConfigError;

pub const DEFAULT_ADDRESS: &str = "127.0.0.1:8000";
pub const DEFAULT_MAX_UPLOAD_MB: usize = 50;

/// Listener settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub address: String,
    pub max_body_bytes: usize,
}

impl ServerConfig {
    /// Reads `API_ADDRESS` (default `127.0.0.1:8000`) and `MAX_UPLOAD_MB` (default 50).
    pub fn from_env() -> Result<Self, ConfigError> {
        let address = match std::env::var("API_ADDRESS") {
            Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
            _ => DEFAULT_ADDRESS.to_string(),
        };
        let max_body_bytes = match std::env::var("MAX_UPLOAD_MB") {
            Ok(v) if !v.trim().is_empty() => upload_limit_bytes(&v)?,
            _ => DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
        };
        Ok(Self {
            address,
            max_body_bytes,
        })
    }
}

/// Megabytes to bytes; zero, garbage and overflowing values are rejected.
fn upload_limit_bytes(raw: &str) -> Result<usize, ConfigError> {
    let bytes = raw
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|mb| *mb > 0)
        .and_then(|mb| mb.checked_mul(1024 * 1024));
    match bytes {
        Some(b) => Ok(b),
        None => Err(ConfigError::InvalidValue {
            var: "MAX_UPLOAD_MB",
            value: raw.to_string(),
        }),
    }
}
