mod client;
mod types;

pub use client::{InferenceEngine, OpenAiEngine};
pub use types::*;
