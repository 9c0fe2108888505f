use super::types::{
    AnalysisResult, ErrorDetail, HealthStatus, ImageAnalysisQuery, RootMessage, TextQuery,
    TextResult,
};
use crate::{
    Result,
    config::{Config, GenerationConfig},
    engine::InferenceEngine,
    vision,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    /// Locked per call so inference runs one request at a time.
    pub engine: Arc<Mutex<dyn InferenceEngine>>,
    pub image_token: String,
    pub generation: GenerationConfig,
}

impl AppState {
    pub fn new(engine: impl InferenceEngine + 'static, config: &Config) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            image_token: config.engine.image_token.clone(),
            generation: config.generation.clone(),
        }
    }
}

pub async fn process_text(
    State(state): State<AppState>,
    Json(query): Json<TextQuery>,
) -> std::result::Result<Json<TextResult>, (StatusCode, Json<ErrorDetail>)> {
    let request_id = Uuid::new_v4();
    info!(
        %request_id,
        "Received text generation request ({} chars)",
        query.text.chars().count()
    );

    let engine = state.engine.lock().await;
    match engine
        .generate(None, &query.text, &state.generation.text)
        .await
    {
        Ok(response) => {
            info!(%request_id, "Text generation completed");
            Ok(Json(TextResult { response }))
        }
        Err(e) => {
            error!(%request_id, "Text generation failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorDetail {
                    detail: e.to_string(),
                }),
            ))
        }
    }
}

/// Always answers 200; failures are reported in the body.
pub async fn analyze_image(
    State(state): State<AppState>,
    Query(query): Query<ImageAnalysisQuery>,
) -> Json<AnalysisResult> {
    let request_id = Uuid::new_v4();
    info!(%request_id, "Received analysis request for: {}", query.image_path);

    let result = run_analysis(&state, query).await;
    match &result {
        Ok(_) => info!(%request_id, "Image analysis completed"),
        Err(e) => error!(%request_id, "Image analysis failed: {}", e),
    }

    Json(AnalysisResult::from(result))
}

async fn run_analysis(state: &AppState, query: ImageAnalysisQuery) -> Result<String> {
    let image = vision::load_image_blocking(query.image_path).await?;
    let prompt = vision::mark_prompt(&state.image_token, &query.prompt);

    let engine = state.engine.lock().await;
    engine
        .generate(Some(&image), &prompt, &state.generation.vision)
        .await
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus { status: "healthy" })
}

pub async fn root() -> Json<RootMessage> {
    Json(RootMessage {
        message: "A-Eye local inference server is running",
    })
}
