use serde::{Deserialize, Serialize};

use crate::error::{ImageGenError, Result};

/// The closed set of supported image models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageModel {
    #[serde(rename = "dall-e-2")]
    DallE2,
    #[serde(rename = "dall-e-3")]
    DallE3,
    #[serde(rename = "gpt-image-1")]
    GptImage1,
}

impl ImageModel {
    pub fn id(&self) -> &'static str {
        match self {
            ImageModel::DallE2 => "dall-e-2",
            ImageModel::DallE3 => "dall-e-3",
            ImageModel::GptImage1 => "gpt-image-1",
        }
    }

    pub fn from_id(id: &str) -> Result<Self> {
        match id {
            "dall-e-2" => Ok(ImageModel::DallE2),
            "dall-e-3" => Ok(ImageModel::DallE3),
            "gpt-image-1" => Ok(ImageModel::GptImage1),
            other => Err(ImageGenError::UnsupportedModel(other.to_string())),
        }
    }

    pub fn all() -> Vec<ImageModel> {
        vec![ImageModel::DallE2, ImageModel::DallE3, ImageModel::GptImage1]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Jpeg,
    Webp,
}

impl OutputFormat {
    pub fn token(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Webp => "webp",
        }
    }

    /// File extension used when artifacts are written to disk.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Webp => "webp",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSize {
    SmallSquare,
    MediumSquare,
    Square,
    Landscape,
    Portrait,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStyle {
    Vivid,
    Natural,
}

impl ImageStyle {
    pub fn token(self) -> &'static str {
        match self {
            ImageStyle::Vivid => "vivid",
            ImageStyle::Natural => "natural",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    Opaque,
    Transparent,
}

impl Background {
    pub fn token(self) -> &'static str {
        match self {
            Background::Opaque => "opaque",
            Background::Transparent => "transparent",
        }
    }
}

/// Provider-agnostic description of one generation or edit request.
///
/// Carries no validity guarantee on its own: the same values can be legal
/// for one model and illegal for another. Validation happens when the
/// request is built against a specific model.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageGenerationRequest {
    pub prompt: String,
    pub model: ImageModel,
    pub num_images: Option<u32>,
    pub output_format: Option<OutputFormat>,
    pub quality: Option<ImageQuality>,
    pub size: Option<ImageSize>,
    pub style: Option<ImageStyle>,
    pub background: Option<Background>,
    pub output_compression: Option<u32>,
    /// Source images for edits, in submission order. Empty for pure
    /// generation. Order is preserved on the wire since some providers
    /// treat image position as meaningful.
    #[serde(default)]
    pub source_images: Vec<Vec<u8>>,
    pub user: Option<String>,
}

impl ImageGenerationRequest {
    pub fn new(model: ImageModel, prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model,
            num_images: None,
            output_format: None,
            quality: None,
            size: None,
            style: None,
            background: None,
            output_compression: None,
            source_images: Vec::new(),
            user: None,
        }
    }

    pub fn with_num_images(mut self, n: u32) -> Self {
        self.num_images = Some(n);
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    pub fn with_quality(mut self, quality: ImageQuality) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_style(mut self, style: ImageStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = Some(background);
        self
    }

    pub fn with_output_compression(mut self, percentage: u32) -> Self {
        self.output_compression = Some(percentage);
        self
    }

    pub fn with_source_image(mut self, bytes: Vec<u8>) -> Self {
        self.source_images.push(bytes);
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }
}

/// Wire-ready JSON body for the generation endpoint. Absent options are
/// omitted entirely; providers distinguish "unspecified" from an explicit
/// default value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateImageRequest {
    pub model: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moderation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_compression: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// Wire-ready representation for the edit endpoint. Rendered as a
/// multipart form, never JSON: each source image becomes one binary
/// `image[]` part, scalar fields follow as text parts.
#[derive(Debug, Clone, PartialEq)]
pub struct EditImageRequest {
    pub model: String,
    pub prompt: String,
    pub images: Vec<Vec<u8>>,
    pub n: Option<u32>,
    pub quality: Option<String>,
    pub response_format: Option<String>,
    pub size: Option<String>,
    pub user: Option<String>,
}

/// One decoded provider result object. The generation endpoint is observed
/// to return either a bare object of this shape or an array of them.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageGenerationResponse {
    #[serde(default)]
    pub created: Option<i64>,
    pub data: Vec<ImageData>,
    #[serde(default)]
    pub usage: Option<ImageGenerationUsage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageData {
    pub b64_json: Option<String>,
    pub url: Option<String>,
    pub revised_prompt: Option<String>,
}

/// Token accounting attached by some endpoints. Parsed but not used by
/// the normalizer.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageGenerationUsage {
    pub input_tokens: Option<u32>,
    pub output_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
    pub input_token_details: Option<InputTokenDetails>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputTokenDetails {
    pub image_tokens: Option<u32>,
    pub text_tokens: Option<u32>,
}

/// Canonical output of a generate/edit call. Position in the returned
/// sequence is the artifact's index; callers use it for naming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageArtifact {
    /// Inline base64-encoded image bytes.
    Base64(String),
    /// Remote location of the image. Resolving the URL into bytes is the
    /// caller's job; the core never fetches it.
    Url(String),
}

impl ImageArtifact {
    pub fn as_base64(&self) -> Option<&str> {
        match self {
            ImageArtifact::Base64(data) => Some(data),
            ImageArtifact::Url(_) => None,
        }
    }

    pub fn as_url(&self) -> Option<&str> {
        match self {
            ImageArtifact::Base64(_) => None,
            ImageArtifact::Url(url) => Some(url),
        }
    }
}
