use serde::{Deserialize, Serialize};

use crate::models::image::ImageModel;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    pub supports_edit: bool,
    pub max_images: u32,
    pub description: String,
}

impl ModelInfo {
    pub fn for_model(model: ImageModel) -> Self {
        match model {
            ImageModel::DallE2 => ModelInfo {
                id: model.id().to_string(),
                name: "DALL-E 2".to_string(),
                supports_edit: true,
                max_images: 10,
                description: "Legacy model with small and medium square sizes".to_string(),
            },
            ImageModel::DallE3 => ModelInfo {
                id: model.id().to_string(),
                name: "DALL-E 3".to_string(),
                supports_edit: false,
                max_images: 1,
                description: "Single-image model with style control and HD quality".to_string(),
            },
            ImageModel::GptImage1 => ModelInfo {
                id: model.id().to_string(),
                name: "GPT Image 1".to_string(),
                supports_edit: true,
                max_images: 10,
                description: "Current model with transparency, format and compression control"
                    .to_string(),
            },
        }
    }
}
