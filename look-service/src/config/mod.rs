use secrecy::SecretString;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-preview-09-2025";

/// Inbound body limit. Base64 photos from phones run to several megabytes.
const DEFAULT_MAX_BODY_BYTES: usize = 6 * 1024 * 1024;

#[derive(Debug)]
pub struct LookConfig {
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    pub max_body_bytes: usize,
}

#[derive(Debug)]
pub struct GeminiSettings {
    /// Read once from `GEMINI_API_KEY` at startup; rotating the key needs a
    /// restart. Absent keys are reported per request, not at startup.
    pub api_key: Option<SecretString>,
    pub api_base: String,
    pub model: String,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
        }
    }
}

impl LookConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        let max_body_bytes = get_env("LOOK_MAX_BODY_BYTES", &DEFAULT_MAX_BODY_BYTES.to_string())
            .parse()
            .map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("LOOK_MAX_BODY_BYTES is invalid: {}", e))
            })?;

        Ok(LookConfig {
            common,
            gemini: GeminiSettings {
                api_key: api_key_from(env::var("GEMINI_API_KEY").ok()),
                api_base: get_env("GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE),
                model: get_env("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            },
            max_body_bytes,
        })
    }
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            common: core_config::Config::default(),
            gemini: GeminiSettings::default(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// An empty key is treated the same as a missing one.
fn api_key_from(raw: Option<String>) -> Option<SecretString> {
    raw.filter(|key| !key.trim().is_empty())
        .map(SecretString::new)
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
