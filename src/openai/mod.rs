pub mod capability;
pub mod image_client;

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::{
    config::OpenAIConfig,
    error::{ImageGenError, Result},
    models::{ImageArtifact, ImageGenerationRequest},
};

pub use image_client::{ImageClient, DEFAULT_BASE_URL};

#[derive(Debug, Clone)]
pub struct OpenAIClient {
    image_client: ImageClient,
}

impl OpenAIClient {
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;

        Self::with_http_client(config, http)
    }

    /// Build a client around an externally owned HTTP client. The
    /// connection pool is shared; timeout policy belongs to it.
    pub fn with_http_client(config: OpenAIConfig, http: reqwest::Client) -> Result<Self> {
        let api_key = config
            .api_key
            .ok_or_else(|| ImageGenError::Config("OpenAI API key is required".into()))?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            image_client: ImageClient::new(http, api_key, base_url),
        })
    }

    pub fn images(&self) -> &ImageClient {
        &self.image_client
    }

    /// Generate and base64-decode in one call. Every artifact must carry
    /// inline data; a URL artifact is an error here since this helper
    /// promises raw bytes. Use `images().generate()` to receive URLs.
    pub async fn generate_decoded(
        &self,
        request: ImageGenerationRequest,
    ) -> Result<Vec<Vec<u8>>> {
        let artifacts = self.image_client.generate(request).await?;
        decode_artifacts(artifacts)
    }
}

fn decode_artifacts(artifacts: Vec<ImageArtifact>) -> Result<Vec<Vec<u8>>> {
    artifacts
        .into_iter()
        .map(|artifact| match artifact {
            ImageArtifact::Base64(data) => {
                STANDARD
                    .decode(&data)
                    .map_err(|e| ImageGenError::MalformedResponse {
                        body: format!("invalid base64 image data: {}", e),
                    })
            }
            ImageArtifact::Url(url) => Err(ImageGenError::MalformedResponse {
                body: format!("expected inline image data, provider returned a url: {}", url),
            }),
        })
        .collect()
}
