use async_trait::async_trait;
use reqwest::multipart;

use crate::{
    error::{ImageGenError, OperationKind, Result},
    logger,
    models::{
        EditImageRequest, ImageArtifact, ImageGenerationRequest, ImageGenerationResponse,
        ImageModel, ModelInfo,
    },
    openai::capability,
    traits::ImageGenerator,
};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// How much of a provider error body ends up in the log line. The full
/// body is still handed to the caller inside the error.
const LOG_BODY_LIMIT: usize = 512;

#[derive(Debug, Clone)]
pub struct ImageClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl ImageClient {
    pub fn new(http: reqwest::Client, api_key: String, base_url: String) -> Self {
        Self {
            http,
            api_key,
            base_url,
        }
    }

    pub fn supported_models() -> Vec<ModelInfo> {
        ImageModel::all().into_iter().map(ModelInfo::for_model).collect()
    }

    /// Generate images from a prompt. Returns the ordered artifact list;
    /// any failure is annotated with the model and operation kind.
    pub async fn generate(&self, request: ImageGenerationRequest) -> Result<Vec<ImageArtifact>> {
        let model = request.model;
        self.generate_inner(&request)
            .await
            .map_err(|e| e.in_operation(model.id(), OperationKind::Create))
    }

    /// Edit one or more source images with a prompt. Source image order
    /// is preserved on the wire.
    pub async fn edit(&self, request: ImageGenerationRequest) -> Result<Vec<ImageArtifact>> {
        let model = request.model;
        self.edit_inner(&request)
            .await
            .map_err(|e| e.in_operation(model.id(), OperationKind::Edit))
    }

    async fn generate_inner(
        &self,
        request: &ImageGenerationRequest,
    ) -> Result<Vec<ImageArtifact>> {
        let payload = capability::build_create_request(request.model, request)?;

        log::info!("Generating images with model: {}", payload.model);
        let _timer = logger::timer(&format!("image create ({})", payload.model));

        let response = self
            .http
            .post(format!("{}/images/generations", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let body = Self::read_body(response).await?;
        deserialize_images(&body)
    }

    async fn edit_inner(&self, request: &ImageGenerationRequest) -> Result<Vec<ImageArtifact>> {
        let payload = capability::build_edit_request(request.model, request)?;

        log::info!(
            "Editing {} source image(s) with model: {}",
            payload.images.len(),
            payload.model
        );
        let _timer = logger::timer(&format!("image edit ({})", payload.model));

        let form = build_edit_form(payload)?;
        let response = self
            .http
            .post(format!("{}/images/edits", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let body = Self::read_body(response).await?;
        deserialize_images(&body)
    }

    async fn read_body(response: reqwest::Response) -> Result<String> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            log::error!(
                "Provider call failed with status {}: {}",
                status,
                truncate_for_log(&body)
            );
            return Err(ImageGenError::ProviderCall {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl ImageGenerator for ImageClient {
    async fn generate(&self, request: ImageGenerationRequest) -> Result<Vec<ImageArtifact>> {
        ImageClient::generate(self, request).await
    }

    async fn edit(&self, request: ImageGenerationRequest) -> Result<Vec<ImageArtifact>> {
        ImageClient::edit(self, request).await
    }
}

/// Render an edit request as multipart/form-data: one `image[]` binary
/// part per source image (filename `image{i}.png`, zero-based submission
/// order), then the scalar text parts, absent fields omitted.
fn build_edit_form(request: EditImageRequest) -> Result<multipart::Form> {
    let mut form = multipart::Form::new();

    for (index, bytes) in request.images.into_iter().enumerate() {
        let part = multipart::Part::bytes(bytes)
            .file_name(format!("image{}.png", index))
            .mime_str("image/png")?;
        form = form.part("image[]", part);
    }

    form = form.text("prompt", request.prompt);
    form = form.text("model", request.model);

    if let Some(n) = request.n {
        form = form.text("n", n.to_string());
    }
    if let Some(size) = request.size {
        form = form.text("size", size);
    }
    if let Some(quality) = request.quality {
        form = form.text("quality", quality);
    }
    if let Some(user) = request.user {
        form = form.text("user", user);
    }

    Ok(form)
}

/// Normalize a raw response body into the ordered artifact list.
///
/// The generation endpoints are observed to answer with either a JSON
/// array of result objects or a single bare object; both shapes are
/// accepted. Entries carrying inline base64 win over URL entries; entries
/// with neither are dropped, they are provider-side encoding failures
/// inside an otherwise successful response.
fn deserialize_images(body: &str) -> Result<Vec<ImageArtifact>> {
    let responses: Vec<ImageGenerationResponse> =
        match serde_json::from_str::<Vec<ImageGenerationResponse>>(body) {
            Ok(list) => list,
            Err(_) => match serde_json::from_str::<ImageGenerationResponse>(body) {
                Ok(single) => vec![single],
                Err(e) => {
                    log::error!("Failed to deserialize provider response: {}", e);
                    return Err(ImageGenError::MalformedResponse {
                        body: body.to_string(),
                    });
                }
            },
        };

    Ok(responses
        .into_iter()
        .flat_map(|response| response.data)
        .filter_map(|entry| {
            if let Some(b64) = entry.b64_json {
                Some(ImageArtifact::Base64(b64))
            } else {
                entry.url.map(ImageArtifact::Url)
            }
        })
        .collect())
}

fn truncate_for_log(body: &str) -> &str {
    match body.char_indices().nth(LOG_BODY_LIMIT) {
        Some((offset, _)) => &body[..offset],
        None => body,
    }
}
