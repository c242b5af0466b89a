//! Command line surface of the workshop binary.

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::config::ServerConfig;
use crate::samples::Sample;

/// Env vars echoed before a sample runs
pub const BACKEND_ENV_VARS: [&str; 4] = [
    "GOOGLE_API_KEY",
    "GOOGLE_GENAI_USE_VERTEXAI",
    "GOOGLE_CLOUD_PROJECT",
    "GOOGLE_CLOUD_LOCATION",
];

/// Gemini workshop samples
#[derive(Parser, Debug)]
#[command(name = "genai-workshop")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Index of the sample to run
    #[arg(short = 'n', default_value_t = -1, allow_negative_numbers = true)]
    pub n: i64,

    /// Path to configuration file (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the sample input files
    #[arg(long = "testdata", value_name = "DIR", default_value = "./testdata")]
    pub testdata: PathBuf,

    /// Directory generated images are written to
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,
}

/// Usage text printed when no valid sample index is given.
pub fn usage(program: &str, samples: &[Box<dyn Sample>]) -> String {
    let mut text = format!("Syntax:\n\t{program} -n=N\n");
    text.push_str("\nwhere N is the index of a sample:\n\n");
    for (i, sample) in samples.iter().enumerate() {
        text.push_str(&format!("\t{i}\t{}\n", sample.name()));
    }
    text.push('\n');
    text.push_str("To use the GeminiAPI backend, set the GOOGLE_API_KEY env var.\n");
    text.push('\n');
    text.push_str(
        "To use the VertexAI backend, set the GOOGLE_GENAI_USE_VERTEXAI, \
         GOOGLE_CLOUD_PROJECT, GOOGLE_CLOUD_LOCATION env vars.\n",
    );
    text.push('\n');
    text
}

/// Echo the backend env vars and the selected backend.
pub fn write_banner(out: &mut dyn Write, config: &ServerConfig) -> io::Result<()> {
    for name in BACKEND_ENV_VARS {
        writeln!(out, "{name}={}", std::env::var(name).unwrap_or_default())?;
    }
    writeln!(out, "(using {} backend)", config.backend())?;
    writeln!(out)
}
