use super::types::*;
use crate::{Error, Result, config::EngineConfig};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessageContentPartImageArgs,
        ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestUserMessageArgs,
        ChatCompletionRequestUserMessageContent, ChatCompletionRequestUserMessageContentPart,
        CreateChatCompletionRequestArgs, CreateCompletionRequestArgs, ImageUrlArgs,
    },
};
use async_trait::async_trait;
use tracing::{debug, info};

/// Text or image-to-text generation.
///
/// Implementations run each call to completion; partial output is never
/// returned.
#[async_trait]
pub trait InferenceEngine: Send + Sync {
    async fn generate(
        &self,
        image: Option<&ImageInput>,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String>;
}

/// Engine backed by a locally hosted OpenAI-compatible model server.
pub struct OpenAiEngine {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiEngine {
    pub fn new(config: EngineConfig) -> Self {
        let mut openai_config = OpenAIConfig::new().with_api_key(config.api_key);

        if !config.base_url.is_empty() {
            openai_config = openai_config.with_api_base(config.base_url);
        }

        let client = Client::with_config(openai_config);

        Self {
            client,
            model: config.model,
        }
    }

    /// Builds the engine and, unless disabled, confirms the backend serves
    /// the configured model. Callers treat an error here as fatal.
    pub async fn load(config: EngineConfig) -> Result<Self> {
        let verify = config.verify_model;
        let engine = Self::new(config);

        if verify {
            engine.verify_model().await?;
        }

        info!("Inference engine ready with model: {}", engine.model);
        Ok(engine)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn verify_model(&self) -> Result<()> {
        let models = self.client.models().list().await?;
        debug!("Backend lists {} models", models.data.len());

        if models.data.iter().any(|m| m.id == self.model) {
            Ok(())
        } else {
            Err(Error::ModelNotFound {
                model: self.model.clone(),
            })
        }
    }

    async fn complete_text(&self, prompt: &str, options: &GenerationOptions) -> Result<String> {
        let mut request_builder = CreateCompletionRequestArgs::default();
        request_builder
            .model(&self.model)
            .prompt(prompt)
            .max_tokens(options.max_length)
            .temperature(options.temperature)
            .n(options.num_return_sequences)
            // The caller expects the prompt followed by its continuation.
            .echo(true);

        if options.num_beams > 1 {
            request_builder.best_of(u8::try_from(options.num_beams).unwrap_or(u8::MAX));
        }

        if let Some(seed) = options.seed {
            request_builder.seed(seed);
        }

        let request = request_builder.build()?;
        let response = self.client.completions().create(request).await?;

        debug!(
            "Received completion response with {} choices",
            response.choices.len()
        );

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.text)
            .ok_or_else(|| Error::engine("Backend returned no completions"))
    }

    async fn describe_image(
        &self,
        image: &ImageInput,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String> {
        if options.num_beams > 1 {
            debug!(
                "Chat backends have no beam search, ignoring num_beams={}",
                options.num_beams
            );
        }

        let text_part = ChatCompletionRequestMessageContentPartTextArgs::default()
            .text(prompt)
            .build()?;
        let image_part = ChatCompletionRequestMessageContentPartImageArgs::default()
            .image_url(ImageUrlArgs::default().url(image.to_data_url()).build()?)
            .build()?;

        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(ChatCompletionRequestUserMessageContent::Array(vec![
                ChatCompletionRequestUserMessageContentPart::Text(text_part),
                ChatCompletionRequestUserMessageContentPart::ImageUrl(image_part),
            ]))
            .build()?;

        let mut request_builder = CreateChatCompletionRequestArgs::default();
        request_builder
            .model(&self.model)
            .messages(vec![message.into()])
            .max_tokens(options.max_length)
            .temperature(options.temperature)
            .n(options.num_return_sequences);

        if let Some(seed) = options.seed {
            request_builder.seed(seed);
        }

        let request = request_builder.build()?;

        debug!(
            "Sending {}x{} image to model {}",
            image.width, image.height, self.model
        );

        let response = self.client.chat().create(request).await?;

        debug!(
            "Received chat completion response with {} choices",
            response.choices.len()
        );

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| Error::engine("Backend returned no analysis"))
    }
}

#[async_trait]
impl InferenceEngine for OpenAiEngine {
    async fn generate(
        &self,
        image: Option<&ImageInput>,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String> {
        match image {
            Some(image) => self.describe_image(image, prompt, options).await,
            None => self.complete_text(prompt, options).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn create_test_config() -> EngineConfig {
        EngineConfig {
            base_url: "http://127.0.0.1:9999/v1".to_string(),
            api_key: String::new(),
            model: "test-model".to_string(),
            image_token: "<image>".to_string(),
            verify_model: false,
        }
    }

    #[test]
    fn test_engine_creation() {
        let engine = OpenAiEngine::new(create_test_config());
        assert_eq!(engine.model(), "test-model");
    }

    #[tokio::test]
    async fn test_load_without_verification_skips_backend() {
        // Nothing listens on the configured port.
        let engine = OpenAiEngine::load(create_test_config()).await.unwrap();
        assert_eq!(engine.model(), "test-model");
    }

    #[test]
    fn test_image_data_url() {
        let image = ImageInput {
            width: 1,
            height: 1,
            png: vec![0x89, b'P', b'N', b'G'],
        };

        assert_eq!(image.to_data_url(), "data:image/png;base64,iVBORw==");
    }
}
