use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Quality slider bounds, shared by both shells.
pub const MIN_STEPS: u32 = 15;
pub const MAX_STEPS: u32 = 50;
pub const STEPS_INCREMENT: u32 = 5;
pub const DEFAULT_STEPS: u32 = 30;

pub const DEFAULT_TOPIC: &str = "La fotosíntesis";

/// One user action: a topic, a style label and a quality setting.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRequest {
    pub topic: String,
    pub style: String,
    #[serde(default = "default_steps")]
    pub steps: u32,
}

fn default_steps() -> u32 {
    DEFAULT_STEPS
}

impl GenerationRequest {
    pub fn new(topic: impl Into<String>, style: impl Into<String>, steps: u32) -> Self {
        Self {
            topic: topic.into(),
            style: style.into(),
            steps,
        }
    }

    /// Inference steps forced into the slider range.
    pub fn clamped_steps(&self) -> u32 {
        self.steps.clamp(MIN_STEPS, MAX_STEPS)
    }
}

/// Parameters handed to the inference gateway for one rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisJob {
    pub prompt: String,
    pub negative_prompt: String,
    pub steps: u32,
    pub guidance_scale: f32,
    pub width: u32,
    pub height: u32,
}

/// The rendered picture as returned by the gateway.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedImage {
    /// Raw PNG bytes.
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Checkpoint that produced the image.
    pub model: String,
}

impl GeneratedImage {
    /// Base64 form for embedding as an inline data URI.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }
}
