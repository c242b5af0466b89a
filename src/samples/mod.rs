//! Workshop samples
//!
//! Each sample is a small program against the GenAI client, selected by its
//! index on the command line. Samples write their console output to the
//! writer they are given so tests can capture it.
//!
//! | Index | Sample |
//! |---|---|
//! | 0-1 | text prompts ([`text`]) |
//! | 2-4 | image, audio and video prompts ([`multimodal`]) |
//! | 5-6 | Imagen generation and upscaling ([`images`]) |
//! | 7-8 | live relay servers ([`live_server`]) |

use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::ServerConfig;
use crate::core::genai::GenAiClient;

pub mod images;
pub mod live_server;
pub mod multimodal;
pub mod text;

/// Everything a sample needs to run.
#[derive(Debug, Clone)]
pub struct SampleContext {
    pub client: GenAiClient,
    pub config: ServerConfig,
    /// Directory holding `pool.png`, `math.m4a`, `pixel8.mp4` and `lion.jpg`
    pub testdata: PathBuf,
    /// Directory generated images are written to
    pub output_dir: PathBuf,
}

impl SampleContext {
    pub fn testdata_file(&self, name: &str) -> PathBuf {
        self.testdata.join(name)
    }

    /// Path for a generated file; bare file name when writing to `.`
    pub fn output_file(&self, name: &str) -> PathBuf {
        if self.output_dir.as_os_str().is_empty() || self.output_dir == Path::new(".") {
            PathBuf::from(name)
        } else {
            self.output_dir.join(name)
        }
    }
}

/// A runnable workshop sample.
#[async_trait]
pub trait Sample: Send + Sync {
    /// Short description shown in the usage text
    fn name(&self) -> &'static str;

    async fn run(&self, ctx: &SampleContext, out: &mut (dyn Write + Send)) -> anyhow::Result<()>;
}

/// All samples in index order.
pub fn all() -> Vec<Box<dyn Sample>> {
    vec![
        Box::new(text::TextPrompt),
        Box::new(text::TextStream),
        Box::new(multimodal::ImageInput),
        Box::new(multimodal::AudioInput),
        Box::new(multimodal::VideoInput),
        Box::new(images::GenerateImages),
        Box::new(images::UpscaleImage),
        Box::new(live_server::LiveServer::streaming()),
        Box::new(live_server::LiveServer::forbidden_words()),
    ]
}

/// Sample at `index`, if it exists.
pub fn get(index: i64) -> Option<Box<dyn Sample>> {
    let index = usize::try_from(index).ok()?;
    all().into_iter().nth(index)
}
