pub mod config;
pub mod diffusion;
pub mod error;
pub mod generation;
pub mod logger;
pub mod models;
pub mod prompt;
pub mod web;

pub use config::{Config, GatewayConfig};
pub use diffusion::{ImageSynthesizer, StableDiffusionClient};
pub use error::{EduImaginaError, Result};
pub use models::{GeneratedImage, GenerationRequest, SynthesisJob};
pub use prompt::{ComposedPrompt, StyleEntry};
