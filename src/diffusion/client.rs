use crate::config::GatewayConfig;
use crate::error::{EduImaginaError, Result};
use crate::models::{
    GeneratedImage, OptionsPatch, SdModelInfo, SynthesisJob, Txt2ImgRequest, Txt2ImgResponse,
};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;

use super::ImageSynthesizer;

/// Client for a Stable Diffusion WebUI-compatible inference runtime.
///
/// Connecting probes the runtime, resolves the configured model identifier
/// against the checkpoints the runtime reports and selects the match. The
/// runtime itself owns device placement, numeric precision and its
/// memory-saving modes.
#[derive(Debug, Clone)]
pub struct StableDiffusionClient {
    client: Client,
    base_url: String,
    model: String,
    sampler: String,
}

impl StableDiffusionClient {
    pub async fn connect(config: GatewayConfig) -> Result<Self> {
        let base_url = config.resolved_base_url().trim_end_matches('/').to_string();
        let model_id = config.resolved_model_id();
        let sampler = config.resolved_sampler();

        log::info!("🔄 Connecting to inference runtime at {}", base_url);

        let client = Client::new();
        let response = client
            .get(format!("{}/sdapi/v1/sd-models", base_url))
            .send()
            .await
            .map_err(|e| {
                EduImaginaError::RequestError(format!(
                    "inference runtime unreachable at {}: {}",
                    base_url, e
                ))
            })?;

        if !response.status().is_success() {
            return Err(EduImaginaError::ResponseError(format!(
                "checkpoint listing returned {}",
                response.status()
            )));
        }

        let checkpoints: Vec<SdModelInfo> = response
            .json()
            .await
            .map_err(|e| EduImaginaError::ResponseError(e.to_string()))?;

        let model = match resolve_checkpoint(&checkpoints, &model_id) {
            Some(title) => {
                log::info!("📦 Selecting checkpoint: {}", title);
                let patch = OptionsPatch {
                    sd_model_checkpoint: title.clone(),
                };
                let response = client
                    .post(format!("{}/sdapi/v1/options", base_url))
                    .json(&patch)
                    .send()
                    .await
                    .map_err(|e| {
                        EduImaginaError::RequestError(format!(
                            "checkpoint selection failed: {}",
                            e
                        ))
                    })?;
                if !response.status().is_success() {
                    return Err(EduImaginaError::RuntimeError(format!(
                        "checkpoint selection returned {}",
                        response.status()
                    )));
                }
                title
            }
            None => {
                log::warn!(
                    "⚠️  No checkpoint matching '{}' on the runtime, keeping its active checkpoint",
                    model_id
                );
                model_id
            }
        };

        log::info!("✅ Inference runtime ready (sampler: {})", sampler);

        Ok(Self {
            client,
            base_url,
            model,
            sampler,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_payload(&self, job: &SynthesisJob) -> Txt2ImgRequest {
        Txt2ImgRequest {
            prompt: job.prompt.clone(),
            negative_prompt: job.negative_prompt.clone(),
            steps: job.steps,
            cfg_scale: job.guidance_scale,
            width: job.width,
            height: job.height,
            sampler_name: self.sampler.clone(),
            batch_size: 1,
            n_iter: 1,
            seed: -1,
        }
    }
}

#[async_trait]
impl ImageSynthesizer for StableDiffusionClient {
    async fn generate(&self, job: SynthesisJob) -> Result<GeneratedImage> {
        let payload = self.build_payload(&job);

        log::info!("🎨 Rendering with checkpoint: {}", self.model);
        log::debug!(
            "txt2img: {} steps, cfg {}, {}x{}, sampler {}",
            payload.steps,
            payload.cfg_scale,
            payload.width,
            payload.height,
            payload.sampler_name
        );

        let response = self
            .client
            .post(format!("{}/sdapi/v1/txt2img", self.base_url))
            .json(&payload)
            .send()
            .await
            .map_err(|e| EduImaginaError::RequestError(format!("txt2img request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(EduImaginaError::RuntimeError(format!(
                "txt2img returned {}: {}",
                status, error_text
            )));
        }

        let body: Txt2ImgResponse = response
            .json()
            .await
            .map_err(|e| EduImaginaError::ResponseError(e.to_string()))?;

        let first = body
            .images
            .first()
            .ok_or_else(|| EduImaginaError::ResponseError("no images generated".into()))?;

        let data = STANDARD
            .decode(first)
            .map_err(|e| EduImaginaError::DecodeError(format!("invalid image payload: {}", e)))?;

        Ok(GeneratedImage {
            data,
            width: job.width,
            height: job.height,
            model: self.model.clone(),
        })
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Match the configured model identifier against the runtime's checkpoints.
///
/// Tries an exact title or name match first, then case-insensitive
/// containment either way (hub-style identifiers carry an owner prefix the
/// runtime never reports).
fn resolve_checkpoint(checkpoints: &[SdModelInfo], model_id: &str) -> Option<String> {
    if let Some(found) = checkpoints
        .iter()
        .find(|c| c.title == model_id || c.model_name == model_id)
    {
        return Some(found.title.clone());
    }

    let wanted = model_id.rsplit('/').next().unwrap_or(model_id).to_lowercase();
    checkpoints
        .iter()
        .find(|c| {
            let name = c.model_name.to_lowercase();
            let title = c.title.to_lowercase();
            name.contains(&wanted) || title.contains(&wanted) || wanted.contains(&name)
        })
        .map(|c| c.title.clone())
}
