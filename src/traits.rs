use async_trait::async_trait;

use crate::{
    error::Result,
    models::{ImageArtifact, ImageGenerationRequest},
};

/// The generation seam consumed by callers (chat commands, services).
///
/// Implementations take a provider-agnostic parameter set and return the
/// ordered artifact list. Each call is independent; implementations hold
/// no per-call state and are safe to share across tasks.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, request: ImageGenerationRequest) -> Result<Vec<ImageArtifact>>;

    async fn edit(&self, request: ImageGenerationRequest) -> Result<Vec<ImageArtifact>>;
}
