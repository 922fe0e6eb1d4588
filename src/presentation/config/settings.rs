use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub auth: AuthSettings,
    pub sarvam: SarvamSettings,
    pub media: MediaSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    /// Shared secret compared for equality against the `pin` form field.
    pub pin: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SarvamSettings {
    /// Absent key is a configuration error surfaced at request time.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub language_code: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaSettings {
    pub upload_dir: PathBuf,
    pub chunk_dir: PathBuf,
    pub tool_timeout_secs: u64,
    pub max_upload_mb: usize,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            server: ServerSettings {
                host: env_or("SERVER_HOST", "0.0.0.0"),
                port: std::env::var("SERVER_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            auth: AuthSettings {
                pin: env_or("SECRET_PIN", "1234"),
            },
            sarvam: SarvamSettings {
                api_key: std::env::var("SARVAM_API_KEY").ok().filter(|k| !k.is_empty()),
                base_url: env_or("SARVAM_BASE_URL", "https://api.sarvam.ai"),
                model: env_or("SARVAM_MODEL", "saarika:v2.5"),
                language_code: env_or("SARVAM_LANGUAGE_CODE", "te-IN"),
                request_timeout_secs: env_or_parse("SARVAM_TIMEOUT_SECS", 120),
            },
            media: MediaSettings {
                upload_dir: PathBuf::from(env_or("UPLOAD_DIR", "uploads")),
                chunk_dir: PathBuf::from(env_or("CHUNK_DIR", "chunks")),
                tool_timeout_secs: env_or_parse("MEDIA_TOOL_TIMEOUT_SECS", 60),
                max_upload_mb: env_or_parse("MAX_UPLOAD_MB", 50),
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_or_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
