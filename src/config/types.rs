use crate::engine::GenerationOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub mode: ServeMode,
    #[serde(default)]
    pub logs: LogsConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

/// Which request handlers the server mounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServeMode {
    #[default]
    Vision,
    Text,
    Both,
}

impl ServeMode {
    pub fn serves_vision(self) -> bool {
        matches!(self, Self::Vision | Self::Both)
    }

    pub fn serves_text(self) -> bool {
        matches!(self, Self::Text | Self::Both)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Exact origins, or prefixes ending in `*`.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Marker prepended to vision prompts.
    #[serde(default = "default_image_token")]
    pub image_token: String,
    /// Check at startup that the backend serves `model`.
    #[serde(default = "default_verify_model")]
    pub verify_model: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_text_options")]
    pub text: GenerationOptions,
    #[serde(default = "default_vision_options")]
    pub vision: GenerationOptions,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            mode: ServeMode::default(),
            logs: LogsConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            model: default_model(),
            image_token: default_image_token(),
            verify_model: default_verify_model(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            text: default_text_options(),
            vision: default_vision_options(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_allowed_origins() -> Vec<String> {
    vec!["chrome-extension://*".to_string()]
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080/v1".to_string()
}

fn default_model() -> String {
    "llava-hf/llava-1.5-7b-hf".to_string()
}

fn default_image_token() -> String {
    "<image>".to_string()
}

fn default_verify_model() -> bool {
    true
}

fn default_text_options() -> GenerationOptions {
    GenerationOptions {
        max_length: 100,
        num_beams: 1,
        temperature: 1.0,
        num_return_sequences: 1,
        seed: None,
    }
}

fn default_vision_options() -> GenerationOptions {
    GenerationOptions {
        max_length: 256,
        num_beams: 3,
        temperature: 0.7,
        num_return_sequences: 1,
        seed: None,
    }
}
