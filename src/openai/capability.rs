//! Per-model validation and request mapping.
//!
//! Each supported model carries a fixed compatibility table: which sizes,
//! quality tiers and options it accepts, and which provider tokens the
//! accepted values map to. The builders are pure; they either return a
//! wire-ready request or the first violated rule in a fixed per-model
//! order, so a given invalid parameter set always reports the same field.

use crate::{
    error::{ImageGenError, Result},
    models::{
        Background, CreateImageRequest, EditImageRequest, ImageGenerationRequest, ImageModel,
        ImageQuality, ImageSize, ImageStyle, OutputFormat,
    },
};

pub fn build_create_request(
    model: ImageModel,
    request: &ImageGenerationRequest,
) -> Result<CreateImageRequest> {
    check_prompt(request)?;

    match model {
        ImageModel::DallE2 => dalle2_create(request),
        ImageModel::DallE3 => dalle3_create(request),
        ImageModel::GptImage1 => gpt_image1_create(request),
    }
}

pub fn build_edit_request(
    model: ImageModel,
    request: &ImageGenerationRequest,
) -> Result<EditImageRequest> {
    check_prompt(request)?;

    match model {
        ImageModel::DallE2 => dalle2_edit(request),
        ImageModel::DallE3 => Err(ImageGenError::validation(
            "model",
            "image edits are only supported by gpt-image-1 and dall-e-2",
        )),
        ImageModel::GptImage1 => gpt_image1_edit(request),
    }
}

fn check_prompt(request: &ImageGenerationRequest) -> Result<()> {
    if request.prompt.trim().is_empty() {
        return Err(ImageGenError::validation("prompt", "must not be empty"));
    }
    Ok(())
}

fn dalle2_create(request: &ImageGenerationRequest) -> Result<CreateImageRequest> {
    if matches!(
        request.output_format,
        Some(OutputFormat::Jpeg) | Some(OutputFormat::Webp)
    ) {
        return Err(ImageGenError::validation(
            "output_format",
            "only png output is supported for dall-e-2",
        ));
    }

    if request.background == Some(Background::Transparent) {
        return Err(ImageGenError::validation(
            "background",
            "transparency is only supported for gpt-image-1",
        ));
    }

    if let Some(n) = request.num_images {
        if !(1..=10).contains(&n) {
            return Err(ImageGenError::validation(
                "num_images",
                "must be between 1 and 10",
            ));
        }
    }

    if request.output_compression.is_some() {
        return Err(ImageGenError::validation(
            "output_compression",
            "only gpt-image-1 supports output compression",
        ));
    }

    if request.quality.is_some() {
        return Err(ImageGenError::validation(
            "quality",
            "quality is not supported for dall-e-2",
        ));
    }

    if matches!(
        request.size,
        Some(ImageSize::Landscape) | Some(ImageSize::Portrait)
    ) {
        return Err(ImageGenError::validation(
            "size",
            "only small, medium and square sizes are supported for dall-e-2",
        ));
    }

    if request.style.is_some() {
        return Err(ImageGenError::validation(
            "style",
            "style is only supported for dall-e-3",
        ));
    }

    Ok(CreateImageRequest {
        model: "dall-e-2".to_string(),
        prompt: request.prompt.clone(),
        background: None,
        moderation: None,
        n: request.num_images,
        output_compression: None,
        output_format: None,
        quality: None,
        response_format: Some("b64_json".to_string()),
        size: request.size.map(dalle2_size_token).map(str::to_string),
        style: None,
        user: request.user.clone(),
    })
}

fn dalle3_create(request: &ImageGenerationRequest) -> Result<CreateImageRequest> {
    if matches!(
        request.output_format,
        Some(OutputFormat::Jpeg) | Some(OutputFormat::Webp)
    ) {
        return Err(ImageGenError::validation(
            "output_format",
            "only png output is supported for dall-e-3",
        ));
    }

    if request.background == Some(Background::Transparent) {
        return Err(ImageGenError::validation(
            "background",
            "transparency is only supported for gpt-image-1",
        ));
    }

    if let Some(n) = request.num_images {
        if n != 1 {
            return Err(ImageGenError::validation(
                "num_images",
                "dall-e-3 generates exactly one image per request",
            ));
        }
    }

    if request.output_compression.is_some() {
        return Err(ImageGenError::validation(
            "output_compression",
            "only gpt-image-1 supports output compression",
        ));
    }

    if request.quality == Some(ImageQuality::Low) {
        return Err(ImageGenError::validation(
            "quality",
            "low quality is only supported for gpt-image-1",
        ));
    }

    if matches!(
        request.size,
        Some(ImageSize::SmallSquare) | Some(ImageSize::MediumSquare)
    ) {
        return Err(ImageGenError::validation(
            "size",
            "small and medium square sizes are not supported for dall-e-3",
        ));
    }

    Ok(CreateImageRequest {
        model: "dall-e-3".to_string(),
        prompt: request.prompt.clone(),
        background: None,
        moderation: None,
        n: Some(1),
        output_compression: None,
        output_format: None,
        quality: request.quality.map(|quality| {
            match quality {
                ImageQuality::High => "hd",
                // Low is rejected above.
                ImageQuality::Medium | ImageQuality::Low => "standard",
            }
            .to_string()
        }),
        response_format: Some("b64_json".to_string()),
        size: request.size.map(dalle3_size_token).map(str::to_string),
        style: request.style.map(ImageStyle::token).map(str::to_string),
        user: request.user.clone(),
    })
}

fn gpt_image1_create(request: &ImageGenerationRequest) -> Result<CreateImageRequest> {
    if let Some(compression) = request.output_compression {
        if compression > 100 {
            return Err(ImageGenError::validation(
                "output_compression",
                "must be between 0 and 100",
            ));
        }
    }

    if let Some(n) = request.num_images {
        if !(1..=10).contains(&n) {
            return Err(ImageGenError::validation(
                "num_images",
                "must be between 1 and 10",
            ));
        }
    }

    if matches!(
        request.size,
        Some(ImageSize::SmallSquare) | Some(ImageSize::MediumSquare)
    ) {
        return Err(ImageGenError::validation(
            "size",
            "small and medium square sizes are not supported for gpt-image-1",
        ));
    }

    if request.style.is_some() {
        return Err(ImageGenError::validation(
            "style",
            "style is only supported for dall-e-3",
        ));
    }

    Ok(CreateImageRequest {
        model: "gpt-image-1".to_string(),
        prompt: request.prompt.clone(),
        background: request.background.map(Background::token).map(str::to_string),
        moderation: Some("low".to_string()),
        n: request.num_images,
        output_compression: request.output_compression,
        output_format: request
            .output_format
            .map(OutputFormat::token)
            .map(str::to_string),
        quality: request.quality.map(gpt_image1_quality_token).map(str::to_string),
        response_format: None,
        size: request.size.map(gpt_image1_size_token).map(str::to_string),
        style: None,
        user: request.user.clone(),
    })
}

fn dalle2_edit(request: &ImageGenerationRequest) -> Result<EditImageRequest> {
    if request.source_images.len() != 1 {
        return Err(ImageGenError::validation(
            "source_images",
            "exactly one source image is required for dall-e-2 edits",
        ));
    }

    if request.quality.is_some() {
        return Err(ImageGenError::validation(
            "quality",
            "quality is not supported for dall-e-2",
        ));
    }

    if matches!(
        request.size,
        Some(ImageSize::Landscape) | Some(ImageSize::Portrait)
    ) {
        return Err(ImageGenError::validation(
            "size",
            "only small, medium and square sizes are supported for dall-e-2",
        ));
    }

    if let Some(n) = request.num_images {
        if !(1..=10).contains(&n) {
            return Err(ImageGenError::validation(
                "num_images",
                "must be between 1 and 10",
            ));
        }
    }

    Ok(EditImageRequest {
        model: "dall-e-2".to_string(),
        prompt: request.prompt.clone(),
        images: request.source_images.clone(),
        n: request.num_images,
        quality: None,
        response_format: Some("b64_json".to_string()),
        size: request.size.map(dalle2_size_token).map(str::to_string),
        user: request.user.clone(),
    })
}

fn gpt_image1_edit(request: &ImageGenerationRequest) -> Result<EditImageRequest> {
    if request.source_images.is_empty() {
        return Err(ImageGenError::validation(
            "source_images",
            "at least one source image is required",
        ));
    }

    if matches!(
        request.size,
        Some(ImageSize::SmallSquare) | Some(ImageSize::MediumSquare)
    ) {
        return Err(ImageGenError::validation(
            "size",
            "small and medium square sizes are not supported for gpt-image-1",
        ));
    }

    if let Some(n) = request.num_images {
        if !(1..=10).contains(&n) {
            return Err(ImageGenError::validation(
                "num_images",
                "must be between 1 and 10",
            ));
        }
    }

    Ok(EditImageRequest {
        model: "gpt-image-1".to_string(),
        prompt: request.prompt.clone(),
        images: request.source_images.clone(),
        n: request.num_images,
        quality: request.quality.map(gpt_image1_quality_token).map(str::to_string),
        response_format: None,
        size: request.size.map(gpt_image1_size_token).map(str::to_string),
        user: request.user.clone(),
    })
}

fn dalle2_size_token(size: ImageSize) -> &'static str {
    match size {
        ImageSize::SmallSquare => "256x256",
        ImageSize::MediumSquare => "512x512",
        // Landscape and Portrait are rejected before mapping.
        ImageSize::Square | ImageSize::Landscape | ImageSize::Portrait => "1024x1024",
    }
}

fn dalle3_size_token(size: ImageSize) -> &'static str {
    match size {
        ImageSize::Landscape => "1792x1024",
        ImageSize::Portrait => "1024x1792",
        ImageSize::Square | ImageSize::SmallSquare | ImageSize::MediumSquare => "1024x1024",
    }
}

fn gpt_image1_size_token(size: ImageSize) -> &'static str {
    match size {
        ImageSize::Landscape => "1536x1024",
        ImageSize::Portrait => "1024x1536",
        ImageSize::Square | ImageSize::SmallSquare | ImageSize::MediumSquare => "1024x1024",
    }
}

fn gpt_image1_quality_token(quality: ImageQuality) -> &'static str {
    match quality {
        ImageQuality::Low => "low",
        ImageQuality::Medium => "medium",
        ImageQuality::High => "high",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request(model: ImageModel) -> ImageGenerationRequest {
        ImageGenerationRequest::new(model, "a watercolor lighthouse")
    }

    fn validation_field(err: ImageGenError) -> &'static str {
        match err {
            ImageGenError::Validation { field, .. } => field,
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_dalle2_create_minimal() {
        let wire = build_create_request(ImageModel::DallE2, &base_request(ImageModel::DallE2))
            .unwrap();

        assert_eq!(wire.model, "dall-e-2");
        assert_eq!(wire.response_format.as_deref(), Some("b64_json"));
        assert_eq!(wire.n, None);
        assert_eq!(wire.size, None);
        assert_eq!(wire.quality, None);
        assert_eq!(wire.style, None);
        assert_eq!(wire.background, None);
        assert_eq!(wire.moderation, None);
        assert_eq!(wire.output_format, None);
        assert_eq!(wire.output_compression, None);
    }

    #[test]
    fn test_dalle2_create_size_tokens() {
        for (size, token) in [
            (ImageSize::SmallSquare, "256x256"),
            (ImageSize::MediumSquare, "512x512"),
            (ImageSize::Square, "1024x1024"),
        ] {
            let request = base_request(ImageModel::DallE2).with_size(size);
            let wire = build_create_request(ImageModel::DallE2, &request).unwrap();
            assert_eq!(wire.size.as_deref(), Some(token));
        }
    }

    #[test]
    fn test_dalle2_create_rejects_landscape() {
        let request = base_request(ImageModel::DallE2).with_size(ImageSize::Landscape);
        let err = build_create_request(ImageModel::DallE2, &request).unwrap_err();
        assert_eq!(validation_field(err), "size");
    }

    #[test]
    fn test_dalle2_create_rejects_style() {
        let request = base_request(ImageModel::DallE2).with_style(ImageStyle::Vivid);
        let err = build_create_request(ImageModel::DallE2, &request).unwrap_err();
        assert_eq!(validation_field(err), "style");
    }

    #[test]
    fn test_dalle2_create_rejects_quality() {
        let request = base_request(ImageModel::DallE2).with_quality(ImageQuality::Medium);
        let err = build_create_request(ImageModel::DallE2, &request).unwrap_err();
        assert_eq!(validation_field(err), "quality");
    }

    #[test]
    fn test_dalle2_create_rejects_transparency() {
        let request = base_request(ImageModel::DallE2).with_background(Background::Transparent);
        let err = build_create_request(ImageModel::DallE2, &request).unwrap_err();
        assert_eq!(validation_field(err), "background");
    }

    #[test]
    fn test_dalle2_create_accepts_opaque_without_serializing_it() {
        let request = base_request(ImageModel::DallE2).with_background(Background::Opaque);
        let wire = build_create_request(ImageModel::DallE2, &request).unwrap();
        assert_eq!(wire.background, None);
    }

    #[test]
    fn test_dalle2_create_rejects_non_png_output() {
        let request = base_request(ImageModel::DallE2).with_output_format(OutputFormat::Webp);
        let err = build_create_request(ImageModel::DallE2, &request).unwrap_err();
        assert_eq!(validation_field(err), "output_format");
    }

    #[test]
    fn test_dalle2_create_count_range() {
        for n in [1, 5, 10] {
            let request = base_request(ImageModel::DallE2).with_num_images(n);
            let wire = build_create_request(ImageModel::DallE2, &request).unwrap();
            assert_eq!(wire.n, Some(n));
        }
        for n in [0, 11] {
            let request = base_request(ImageModel::DallE2).with_num_images(n);
            let err = build_create_request(ImageModel::DallE2, &request).unwrap_err();
            assert_eq!(validation_field(err), "num_images");
        }
    }

    #[test]
    fn test_dalle3_create_maps_quality_and_style() {
        let request = base_request(ImageModel::DallE3)
            .with_quality(ImageQuality::High)
            .with_style(ImageStyle::Vivid)
            .with_size(ImageSize::Landscape);
        let wire = build_create_request(ImageModel::DallE3, &request).unwrap();

        assert_eq!(wire.model, "dall-e-3");
        assert_eq!(wire.quality.as_deref(), Some("hd"));
        assert_eq!(wire.style.as_deref(), Some("vivid"));
        assert_eq!(wire.size.as_deref(), Some("1792x1024"));
        assert_eq!(wire.n, Some(1));
        assert_eq!(wire.moderation, None);
        assert_eq!(wire.output_format, None);
        assert_eq!(wire.output_compression, None);
        assert_eq!(wire.background, None);
    }

    #[test]
    fn test_dalle3_create_medium_quality_is_standard() {
        let request = base_request(ImageModel::DallE3).with_quality(ImageQuality::Medium);
        let wire = build_create_request(ImageModel::DallE3, &request).unwrap();
        assert_eq!(wire.quality.as_deref(), Some("standard"));
    }

    #[test]
    fn test_dalle3_create_rejects_low_quality() {
        let request = base_request(ImageModel::DallE3).with_quality(ImageQuality::Low);
        let err = build_create_request(ImageModel::DallE3, &request).unwrap_err();
        assert_eq!(validation_field(err), "quality");
    }

    #[test]
    fn test_dalle3_create_pins_single_image() {
        let wire = build_create_request(ImageModel::DallE3, &base_request(ImageModel::DallE3))
            .unwrap();
        assert_eq!(wire.n, Some(1));

        let request = base_request(ImageModel::DallE3).with_num_images(2);
        let err = build_create_request(ImageModel::DallE3, &request).unwrap_err();
        assert_eq!(validation_field(err), "num_images");
    }

    #[test]
    fn test_dalle3_create_rejects_small_sizes() {
        for size in [ImageSize::SmallSquare, ImageSize::MediumSquare] {
            let request = base_request(ImageModel::DallE3).with_size(size);
            let err = build_create_request(ImageModel::DallE3, &request).unwrap_err();
            assert_eq!(validation_field(err), "size");
        }
    }

    #[test]
    fn test_gpt_image1_create_full_mapping() {
        let request = base_request(ImageModel::GptImage1)
            .with_num_images(4)
            .with_background(Background::Transparent)
            .with_output_format(OutputFormat::Webp)
            .with_output_compression(80)
            .with_quality(ImageQuality::Low)
            .with_size(ImageSize::Portrait)
            .with_user("user-7");
        let wire = build_create_request(ImageModel::GptImage1, &request).unwrap();

        assert_eq!(wire.model, "gpt-image-1");
        assert_eq!(wire.background.as_deref(), Some("transparent"));
        assert_eq!(wire.moderation.as_deref(), Some("low"));
        assert_eq!(wire.n, Some(4));
        assert_eq!(wire.output_compression, Some(80));
        assert_eq!(wire.output_format.as_deref(), Some("webp"));
        assert_eq!(wire.quality.as_deref(), Some("low"));
        assert_eq!(wire.response_format, None);
        assert_eq!(wire.size.as_deref(), Some("1024x1536"));
        assert_eq!(wire.user.as_deref(), Some("user-7"));
    }

    #[test]
    fn test_gpt_image1_create_rejects_style() {
        let request = base_request(ImageModel::GptImage1).with_style(ImageStyle::Natural);
        let err = build_create_request(ImageModel::GptImage1, &request).unwrap_err();
        assert_eq!(validation_field(err), "style");
    }

    #[test]
    fn test_gpt_image1_create_compression_bounds() {
        let request = base_request(ImageModel::GptImage1).with_output_compression(101);
        let err = build_create_request(ImageModel::GptImage1, &request).unwrap_err();
        assert_eq!(validation_field(err), "output_compression");

        let request = base_request(ImageModel::GptImage1).with_output_compression(0);
        let wire = build_create_request(ImageModel::GptImage1, &request).unwrap();
        assert_eq!(wire.output_compression, Some(0));
    }

    #[test]
    fn test_empty_prompt_rejected_for_every_model() {
        for model in ImageModel::all() {
            let request = ImageGenerationRequest::new(model, "   ");
            let err = build_create_request(model, &request).unwrap_err();
            assert_eq!(validation_field(err), "prompt");
        }
    }

    #[test]
    fn test_first_violated_rule_wins() {
        // Both output_format and style are illegal for dall-e-2; the
        // documented order checks output_format first.
        let request = base_request(ImageModel::DallE2)
            .with_output_format(OutputFormat::Jpeg)
            .with_style(ImageStyle::Vivid);
        let err = build_create_request(ImageModel::DallE2, &request).unwrap_err();
        assert_eq!(validation_field(err), "output_format");

        // Quality comes before size for dall-e-2.
        let request = base_request(ImageModel::DallE2)
            .with_quality(ImageQuality::High)
            .with_size(ImageSize::Portrait);
        let err = build_create_request(ImageModel::DallE2, &request).unwrap_err();
        assert_eq!(validation_field(err), "quality");
    }

    #[test]
    fn test_create_request_is_idempotent() {
        let request = base_request(ImageModel::GptImage1)
            .with_num_images(2)
            .with_quality(ImageQuality::Medium)
            .with_size(ImageSize::Square);

        let first = build_create_request(ImageModel::GptImage1, &request).unwrap();
        let second = build_create_request(ImageModel::GptImage1, &request).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_dalle2_edit_requires_exactly_one_image() {
        let request = base_request(ImageModel::DallE2)
            .with_source_image(vec![1, 2, 3])
            .with_source_image(vec![4, 5, 6]);
        let err = build_edit_request(ImageModel::DallE2, &request).unwrap_err();
        match err {
            ImageGenError::Validation { field, reason } => {
                assert_eq!(field, "source_images");
                assert!(reason.contains("exactly one source image"));
            }
            other => panic!("expected Validation, got {:?}", other),
        }

        let request = base_request(ImageModel::DallE2);
        let err = build_edit_request(ImageModel::DallE2, &request).unwrap_err();
        assert_eq!(validation_field(err), "source_images");
    }

    #[test]
    fn test_dalle2_edit_happy_path() {
        let request = base_request(ImageModel::DallE2)
            .with_source_image(vec![0xFF, 0xD8])
            .with_size(ImageSize::MediumSquare)
            .with_num_images(2);
        let wire = build_edit_request(ImageModel::DallE2, &request).unwrap();

        assert_eq!(wire.model, "dall-e-2");
        assert_eq!(wire.images.len(), 1);
        assert_eq!(wire.size.as_deref(), Some("512x512"));
        assert_eq!(wire.response_format.as_deref(), Some("b64_json"));
        assert_eq!(wire.n, Some(2));
    }

    #[test]
    fn test_dalle3_edit_unsupported() {
        let request = base_request(ImageModel::DallE3).with_source_image(vec![1]);
        let err = build_edit_request(ImageModel::DallE3, &request).unwrap_err();
        assert_eq!(validation_field(err), "model");
    }

    #[test]
    fn test_gpt_image1_edit_requires_source_image() {
        let request = base_request(ImageModel::GptImage1);
        let err = build_edit_request(ImageModel::GptImage1, &request).unwrap_err();
        assert_eq!(validation_field(err), "source_images");
    }

    #[test]
    fn test_gpt_image1_edit_preserves_image_order() {
        let request = base_request(ImageModel::GptImage1)
            .with_source_image(vec![1])
            .with_source_image(vec![2])
            .with_source_image(vec![3])
            .with_quality(ImageQuality::High);
        let wire = build_edit_request(ImageModel::GptImage1, &request).unwrap();

        assert_eq!(wire.images, vec![vec![1], vec![2], vec![3]]);
        assert_eq!(wire.quality.as_deref(), Some("high"));
        assert_eq!(wire.response_format, None);
    }

    #[test]
    fn test_gpt_image1_edit_count_range() {
        let request = base_request(ImageModel::GptImage1)
            .with_source_image(vec![1])
            .with_num_images(11);
        let err = build_edit_request(ImageModel::GptImage1, &request).unwrap_err();
        assert_eq!(validation_field(err), "num_images");
    }
}
