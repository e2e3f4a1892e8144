use crate::diffusion::ImageSynthesizer;
use crate::error::Result;
use crate::models::{GeneratedImage, GenerationRequest, SynthesisJob};
use crate::prompt;

/// Adherence to the positive prompt, same value for every request.
pub const GUIDANCE_SCALE: f32 = 7.5;
pub const IMAGE_WIDTH: u32 = 512;
pub const IMAGE_HEIGHT: u32 = 512;

/// Check a request without dispatching anything or touching the gateway.
pub fn validate(request: &GenerationRequest) -> Result<()> {
    prompt::compose(&request.topic, &request.style).map(|_| ())
}

/// Run one generation request end to end: validate, compose the prompt
/// pair, invoke the gateway. The caller decides how failures are shown;
/// nothing is dispatched for invalid input.
pub async fn illustrate(
    gateway: &dyn ImageSynthesizer,
    request: &GenerationRequest,
) -> Result<GeneratedImage> {
    let composed = prompt::compose(&request.topic, &request.style)?;

    let job = SynthesisJob {
        prompt: composed.positive,
        negative_prompt: composed.negative.to_string(),
        steps: request.clamped_steps(),
        guidance_scale: GUIDANCE_SCALE,
        width: IMAGE_WIDTH,
        height: IMAGE_HEIGHT,
    };

    let _timer = crate::logger::timer("generation");
    log::info!("🖌️  Drawing '{}' ({})", request.topic.trim(), request.style);
    gateway.generate(job).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diffusion::testing::MockSynthesizer;
    use crate::error::EduImaginaError;

    #[tokio::test]
    async fn test_dispatches_expected_job() {
        let gateway = MockSynthesizer::new();
        let request = GenerationRequest::new(
            "La fotosíntesis",
            "Libro de texto (Esquemático)",
            30,
        );

        illustrate(&gateway, &request).await.unwrap();

        let jobs = gateway.jobs();
        assert_eq!(jobs.len(), 1);
        assert_eq!(
            jobs[0].prompt,
            "La fotosíntesis, educational diagram, white background, textbook style, \
             isometric, clear labels, schematic"
        );
        assert_eq!(jobs[0].negative_prompt, prompt::NEGATIVE_PROMPT);
        assert_eq!(jobs[0].steps, 30);
        assert_eq!(jobs[0].guidance_scale, 7.5);
        assert_eq!(jobs[0].width, 512);
        assert_eq!(jobs[0].height, 512);
    }

    #[tokio::test]
    async fn test_blank_topic_never_reaches_gateway() {
        let gateway = MockSynthesizer::new();

        for topic in ["", "   ", "\t\n"] {
            let request = GenerationRequest::new(topic, "Arte Pixel (Retro)", 30);
            let result = illustrate(&gateway, &request).await;
            assert!(matches!(result, Err(EduImaginaError::InvalidInput(_))));
        }

        assert!(gateway.jobs().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_style_never_reaches_gateway() {
        let gateway = MockSynthesizer::new();
        let request = GenerationRequest::new("La fotosíntesis", "Acuarela", 30);

        assert!(illustrate(&gateway, &request).await.is_err());
        assert!(gateway.jobs().is_empty());
    }

    #[tokio::test]
    async fn test_out_of_range_steps_are_clamped_before_dispatch() {
        let gateway = MockSynthesizer::new();

        let request = GenerationRequest::new("Los volcanes", "Arte Pixel (Retro)", 500);
        illustrate(&gateway, &request).await.unwrap();

        let request = GenerationRequest::new("Los volcanes", "Arte Pixel (Retro)", 1);
        illustrate(&gateway, &request).await.unwrap();

        let jobs = gateway.jobs();
        assert_eq!(jobs[0].steps, 50);
        assert_eq!(jobs[1].steps, 15);
    }

    #[tokio::test]
    async fn test_gateway_failure_carries_underlying_message() {
        let gateway = MockSynthesizer::failing("CUDA out of memory");
        let request = GenerationRequest::new("La fotosíntesis", "Arte Pixel (Retro)", 30);

        let err = illustrate(&gateway, &request).await.unwrap_err();
        assert!(err.to_string().contains("CUDA out of memory"));
    }
}
