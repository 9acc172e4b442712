use std::fs;

use imagelab::{
    ImageGenerationRequest, ImageModel, ImageQuality, ImageSize, ImageStyle, OpenAIClient,
    OpenAIConfig, OutputFormat,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    imagelab::logger::init_with_config(
        imagelab::logger::LoggerConfig::development()
            .with_level(imagelab::logger::LogLevel::Debug),
    )?;

    imagelab::logger::log_startup_info("imagelab", env!("CARGO_PKG_VERSION"));

    let config = OpenAIConfig::from_env();
    imagelab::logger::log_config_info(&config);

    let client = match OpenAIClient::new(config) {
        Ok(client) => {
            log::info!("✅ OpenAI client initialized successfully");
            client
        }
        Err(e) => {
            log::error!("❌ Failed to initialize OpenAI client: {}", e);
            log::warn!("💡 Set IMAGELAB_OPENAI_KEY (or OPENAI_API_KEY) and try again");
            return Err(e.into());
        }
    };

    log::info!("🖼️  Available image generation models:");
    for info in imagelab::ImageClient::supported_models() {
        log::info!(
            "  {} - {} (edit: {}, max images: {})",
            info.id,
            info.name,
            if info.supports_edit { "yes" } else { "no" },
            info.max_images
        );
    }

    // Test 1: generation across models
    log::info!("🎨 Testing image generation...");

    let requests = vec![
        ImageGenerationRequest::new(ImageModel::GptImage1, "A serene mountain lake at sunset")
            .with_output_format(OutputFormat::Png)
            .with_quality(ImageQuality::Medium)
            .with_size(ImageSize::Square),
        ImageGenerationRequest::new(ImageModel::DallE3, "A serene mountain lake at sunset")
            .with_quality(ImageQuality::High)
            .with_style(ImageStyle::Natural),
    ];

    for request in requests {
        let model_id = request.model.id();
        log::info!("🧪 Testing model: {}", model_id);

        match client.generate_decoded(request).await {
            Ok(images) => {
                log::info!("✅ Generated {} image(s) with {}!", images.len(), model_id);

                for (i, bytes) in images.iter().enumerate() {
                    let filename = format!("generated_{}_{}.png", model_id, i);
                    match fs::write(&filename, bytes) {
                        Ok(_) => log::info!("💾 Image saved to: {}", filename),
                        Err(e) => log::error!("❌ Failed to save image: {}", e),
                    }
                }
            }
            Err(e) => {
                log::error!("❌ Image generation failed with {}: {}", model_id, e);
                log::warn!("💡 This model might not be enabled for your account");
            }
        }

        log::info!("---");
    }

    // Test 2: validation failures are reported without a network call
    log::info!("🧪 Testing parameter validation...");

    let invalid = ImageGenerationRequest::new(ImageModel::DallE2, "A serene mountain lake")
        .with_style(ImageStyle::Vivid);

    match client.images().generate(invalid).await {
        Ok(_) => log::warn!("⚠️  Unexpected success with invalid parameters"),
        Err(e) => log::info!("✅ Validation working correctly: {}", e),
    }

    log::info!("🎉 All tests completed!");
    log::info!("💡 Check the generated image files in the current directory");

    Ok(())
}
