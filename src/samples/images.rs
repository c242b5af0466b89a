//! Imagen samples: generation and upscaling.

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use std::io::Write;
use tracing::warn;

use super::{Sample, SampleContext};
use crate::core::genai::{GenerateImagesConfig, Image, UpscaleImageConfig};

pub const IMAGEN_MODEL: &str = "imagen-3.0-generate-002";
pub const IMAGE_PROMPT: &str = "Create an overly decorated umbrella.";
pub const NUMBER_OF_IMAGES: u32 = 4;
pub const UPSCALE_FACTOR: &str = "x4";
pub const UPSCALED_FILE: &str = "upscaled_image.jpg";

/// Sample 5: four JPEGs from one prompt.
pub struct GenerateImages;

#[async_trait]
impl Sample for GenerateImages {
    fn name(&self) -> &'static str {
        "Generate images"
    }

    async fn run(&self, ctx: &SampleContext, out: &mut (dyn Write + Send)) -> anyhow::Result<()> {
        writeln!(out, "Prompt: {IMAGE_PROMPT}")?;
        writeln!(out)?;

        let config = GenerateImagesConfig {
            number_of_images: NUMBER_OF_IMAGES,
            output_mime_type: Some("image/jpeg".to_string()),
            include_rai_reason: true,
        };
        let response = ctx
            .client
            .generate_images(IMAGEN_MODEL, IMAGE_PROMPT, &config)
            .await?;

        for (i, generated) in response.generated_images.iter().enumerate() {
            let Some(bytes) = generated.image.image_bytes()? else {
                warn!(
                    index = i,
                    reason = generated.rai_filtered_reason.as_deref().unwrap_or("unknown"),
                    "Image was filtered"
                );
                continue;
            };

            let path = ctx.output_file(&format!("generated_image_{i}.jpg"));
            writeln!(out, "Writing image to file {}", path.display())?;
            tokio::fs::write(&path, bytes)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        Ok(())
    }
}

/// Sample 6: upscale a local JPEG four times. Vertex AI only.
pub struct UpscaleImage;

#[async_trait]
impl Sample for UpscaleImage {
    fn name(&self) -> &'static str {
        "Upscale image"
    }

    async fn run(&self, ctx: &SampleContext, out: &mut (dyn Write + Send)) -> anyhow::Result<()> {
        let input = ctx.testdata_file("lion.jpg");
        let data = tokio::fs::read(&input)
            .await
            .with_context(|| format!("Failed to read {}", input.display()))?;

        let config = UpscaleImageConfig {
            output_mime_type: Some("image/jpeg".to_string()),
            include_rai_reason: true,
        };
        let response = ctx
            .client
            .upscale_image(
                IMAGEN_MODEL,
                Image::from_bytes(&data, "image/jpeg"),
                UPSCALE_FACTOR,
                &config,
            )
            .await?;

        let upscaled = response
            .generated_images
            .first()
            .ok_or_else(|| anyhow!("no upscaled image returned"))?;
        let bytes = upscaled.image.image_bytes()?.ok_or_else(|| {
            anyhow!(
                "upscaled image was filtered: {}",
                upscaled.rai_filtered_reason.as_deref().unwrap_or("unknown")
            )
        })?;

        let path = ctx.output_file(UPSCALED_FILE);
        writeln!(out, "Writing file {}", path.display())?;
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}
