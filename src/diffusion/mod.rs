pub mod client;

use crate::config::GatewayConfig;
use crate::error::Result;
use crate::models::{GeneratedImage, SynthesisJob};
use async_trait::async_trait;
use tokio::sync::OnceCell;

pub use client::StableDiffusionClient;

/// The seam the presentation shells depend on: one opaque call that turns a
/// prompt pair plus numeric parameters into a rendered image.
#[async_trait]
pub trait ImageSynthesizer: Send + Sync {
    async fn generate(&self, job: SynthesisJob) -> Result<GeneratedImage>;

    /// Identifier of the checkpoint behind this synthesizer.
    fn model(&self) -> &str;
}

static SHARED: OnceCell<StableDiffusionClient> = OnceCell::const_new();

/// Process-wide gateway instance.
///
/// The first caller pays the initialization cost; everyone after that gets
/// the cached client. A failed initialization leaves the cell empty so the
/// next caller retries.
pub async fn shared(config: &GatewayConfig) -> Result<&'static StableDiffusionClient> {
    SHARED
        .get_or_try_init(|| StableDiffusionClient::connect(config.clone()))
        .await
}

/// Whether the process-wide gateway has already been constructed.
pub fn is_initialized() -> bool {
    SHARED.initialized()
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_cell_initializes_at_most_once() {
        let cell: OnceCell<u32> = OnceCell::const_new();
        let constructions = AtomicUsize::new(0);

        for _ in 0..3 {
            let value = cell
                .get_or_try_init(|| async {
                    constructions.fetch_add(1, Ordering::SeqCst);
                    Ok::<u32, crate::error::EduImaginaError>(7)
                })
                .await
                .unwrap();
            assert_eq!(*value, 7);
        }

        assert_eq!(constructions.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cell_retries_after_failed_init() {
        let cell: OnceCell<u32> = OnceCell::const_new();

        let first = cell
            .get_or_try_init(|| async {
                Err::<u32, _>(crate::error::EduImaginaError::RequestError(
                    "runtime unreachable".into(),
                ))
            })
            .await;
        assert!(first.is_err());

        let second = cell
            .get_or_try_init(|| async { Ok::<u32, crate::error::EduImaginaError>(7) })
            .await
            .unwrap();
        assert_eq!(*second, 7);
    }
}
