use serde::{Deserialize, Serialize};

/// `POST /sdapi/v1/txt2img` payload for a WebUI-compatible runtime.
#[derive(Debug, Clone, Serialize)]
pub struct Txt2ImgRequest {
    pub prompt: String,
    pub negative_prompt: String,
    pub steps: u32,
    pub cfg_scale: f32,
    pub width: u32,
    pub height: u32,
    pub sampler_name: String,
    pub batch_size: u32,
    pub n_iter: u32,
    /// -1 leaves seeding to the runtime.
    pub seed: i64,
}

#[derive(Debug, Deserialize)]
pub struct Txt2ImgResponse {
    /// Base64-encoded PNGs, one per requested image.
    pub images: Vec<String>,
}

/// One checkpoint as reported by `GET /sdapi/v1/sd-models`.
#[derive(Debug, Clone, Deserialize)]
pub struct SdModelInfo {
    pub title: String,
    pub model_name: String,
}

/// Subset of `POST /sdapi/v1/options` used to select a checkpoint.
#[derive(Debug, Serialize)]
pub struct OptionsPatch {
    pub sd_model_checkpoint: String,
}
