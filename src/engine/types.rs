use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

/// Decoding parameters forwarded to the backend on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub max_length: u32,
    #[serde(default = "default_num_beams")]
    pub num_beams: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_num_return_sequences")]
    pub num_return_sequences: u8,
    #[serde(default)]
    pub seed: Option<i64>,
}

/// A decoded RGB image, re-encoded as PNG for transport.
#[derive(Debug, Clone)]
pub struct ImageInput {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

impl ImageInput {
    pub fn to_data_url(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }
}

fn default_num_beams() -> u32 {
    1
}

fn default_temperature() -> f32 {
    1.0
}

fn default_num_return_sequences() -> u8 {
    1
}
