//! Text-only samples.

use async_trait::async_trait;
use futures::StreamExt;
use std::io::Write;

use super::{Sample, SampleContext};
use crate::core::genai::{Content, text_of};

pub const TEXT_MODEL: &str = "gemini-1.5-pro-002";
pub const STREAM_MODEL: &str = "gemini-2.0-flash-001";

pub const QUESTION: &str = "When was the battle of Austerlitz?";
pub const STORY_PROMPT: &str = "Tell me a story in 300 words.";

/// Sample 0: one question, one answer.
pub struct TextPrompt;

#[async_trait]
impl Sample for TextPrompt {
    fn name(&self) -> &'static str {
        "Text prompt, text answer"
    }

    async fn run(&self, ctx: &SampleContext, out: &mut (dyn Write + Send)) -> anyhow::Result<()> {
        writeln!(out, "Question: {QUESTION}")?;

        let response = ctx
            .client
            .generate_content(TEXT_MODEL, Content::text(QUESTION))
            .await?;
        writeln!(out, "Answer: {}", text_of(&response)?)?;
        Ok(())
    }
}

/// Sample 1: print a story chunk by chunk as it streams in.
pub struct TextStream;

#[async_trait]
impl Sample for TextStream {
    fn name(&self) -> &'static str {
        "Text prompt, streaming text output"
    }

    async fn run(&self, ctx: &SampleContext, out: &mut (dyn Write + Send)) -> anyhow::Result<()> {
        writeln!(out, "Prompt: {STORY_PROMPT}")?;
        writeln!(out)?;

        let mut stream = ctx
            .client
            .generate_content_stream(STREAM_MODEL, Content::text(STORY_PROMPT))
            .await?;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            write!(out, "{}", text_of(&chunk)?)?;
            out.flush()?;
        }
        Ok(())
    }
}
