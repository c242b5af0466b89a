//! Multimodal prompts: inline image, audio and video next to text.

use anyhow::Context;
use async_trait::async_trait;
use std::io::Write;
use std::path::Path;

use super::{Sample, SampleContext};
use crate::core::genai::{Content, Part, text_of};

pub const MULTIMODAL_MODEL: &str = "gemini-2.0-flash-001";
pub const VIDEO_MODEL: &str = "gemini-2.5-flash-lite";

pub const IMAGE_QUESTIONS: [&str; 2] = [
    "Describe this image",
    "How do I use three of the pool balls in this image to sum up to 30?",
];

pub const VIDEO_QUESTIONS: [&str; 3] = [
    "How many people are in this video?",
    "In which country was this video filmed?",
    "Are there animals in this video?",
];

async fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// Sample 2: two questions about the same picture.
pub struct ImageInput;

#[async_trait]
impl Sample for ImageInput {
    fn name(&self) -> &'static str {
        "Multimodal prompt: text and image"
    }

    async fn run(&self, ctx: &SampleContext, out: &mut (dyn Write + Send)) -> anyhow::Result<()> {
        let image = read_input(&ctx.testdata_file("pool.png")).await?;

        for question in IMAGE_QUESTIONS {
            writeln!(out, "Question: {question}")?;
            writeln!(out)?;

            let prompt = vec![Content::new(vec![
                Part::from_bytes(&image, "image/png"),
                Part::from_text(question),
            ])];
            let response = ctx
                .client
                .generate_content(MULTIMODAL_MODEL, prompt)
                .await?;

            writeln!(out, "Answer: {}", text_of(&response)?)?;
            writeln!(out)?;
        }
        Ok(())
    }
}

/// Sample 3: the recording itself is the prompt.
pub struct AudioInput;

#[async_trait]
impl Sample for AudioInput {
    fn name(&self) -> &'static str {
        "Multimodal prompt: audio"
    }

    async fn run(&self, ctx: &SampleContext, out: &mut (dyn Write + Send)) -> anyhow::Result<()> {
        let path = ctx.testdata_file("math.m4a");
        let audio = read_input(&path).await?;

        writeln!(out, "Input:  {}", path.display())?;
        writeln!(out)?;

        let prompt = vec![Content::new(vec![Part::from_bytes(&audio, "audio/mp4")])];
        let response = ctx
            .client
            .generate_content(MULTIMODAL_MODEL, prompt)
            .await?;

        writeln!(out, "Answer: {}", text_of(&response)?)?;
        writeln!(out)?;
        Ok(())
    }
}

/// Sample 4: three questions about one video in a single call.
pub struct VideoInput;

#[async_trait]
impl Sample for VideoInput {
    fn name(&self) -> &'static str {
        "Multimodal prompt: video"
    }

    async fn run(&self, ctx: &SampleContext, out: &mut (dyn Write + Send)) -> anyhow::Result<()> {
        let video = read_input(&ctx.testdata_file("pixel8.mp4")).await?;

        for (i, question) in VIDEO_QUESTIONS.iter().enumerate() {
            writeln!(out, "Question {}: {question}", i + 1)?;
        }
        writeln!(out)?;

        let mut parts = vec![Part::from_bytes(&video, "video/mp4")];
        parts.extend(VIDEO_QUESTIONS.iter().map(|q| Part::from_text(*q)));

        let response = ctx
            .client
            .generate_content(VIDEO_MODEL, vec![Content::new(parts)])
            .await?;

        writeln!(out, "Answers: {}", text_of(&response)?)?;
        writeln!(out)?;
        Ok(())
    }
}
