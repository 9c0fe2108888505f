use aeye_server::{
    Error, Result,
    engine::{GenerationOptions, ImageInput, InferenceEngine},
};
use async_trait::async_trait;
use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

/// What the mock engine was asked to do.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: String,
    pub image_size: Option<(u32, u32)>,
    pub options: GenerationOptions,
}

#[derive(Debug, Clone)]
enum Behavior {
    /// Prompt followed by a fixed continuation, like a text-generation model
    Echo(String),
    Fixed(String),
    Fail(String),
}

/// Mock inference engine for testing
#[derive(Debug, Clone)]
pub struct MockEngine {
    behavior: Behavior,
    delay: Option<Duration>,
    pub calls: Arc<Mutex<Vec<RecordedCall>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl MockEngine {
    pub fn echoing(continuation: &str) -> Self {
        Self::with_behavior(Behavior::Echo(continuation.to_string()))
    }

    pub fn fixed(output: &str) -> Self {
        Self::with_behavior(Behavior::Fixed(output.to_string()))
    }

    pub fn failing(error: &str) -> Self {
        Self::with_behavior(Behavior::Fail(error.to_string()))
    }

    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            delay: None,
            calls: Arc::new(Mutex::new(Vec::new())),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Hold each call open for `delay` so overlapping calls would be visible
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Highest number of calls that were running at the same time
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn get_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceEngine for MockEngine {
    async fn generate(
        &self,
        image: Option<&ImageInput>,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String> {
        self.calls.lock().unwrap().push(RecordedCall {
            prompt: prompt.to_string(),
            image_size: image.map(|i| (i.width, i.height)),
            options: options.clone(),
        });

        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match &self.behavior {
            Behavior::Echo(continuation) => Ok(format!("{}{}", prompt, continuation)),
            Behavior::Fixed(output) => Ok(output.clone()),
            Behavior::Fail(error) => Err(Error::engine(error.clone())),
        }
    }
}
