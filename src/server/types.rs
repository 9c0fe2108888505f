use crate::vision::DEFAULT_PROMPT;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct TextQuery {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct TextResult {
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub detail: String,
}

#[derive(Debug, Deserialize)]
pub struct ImageAnalysisQuery {
    pub image_path: String,
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

/// Body of every `/analyze` response, success or not.
#[derive(Debug, Serialize)]
pub struct AnalysisResult {
    pub success: bool,
    pub analysis: Option<String>,
    pub error: Option<String>,
}

impl From<crate::Result<String>> for AnalysisResult {
    fn from(result: crate::Result<String>) -> Self {
        match result {
            Ok(analysis) => Self {
                success: true,
                analysis: Some(analysis),
                error: None,
            },
            Err(e) => Self {
                success: false,
                analysis: None,
                error: Some(e.to_string()),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RootMessage {
    pub message: &'static str,
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}
