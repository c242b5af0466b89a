use anyhow::anyhow;
use clap::Parser;
use std::io;

use genai_workshop::{
    ServerConfig,
    cli::{self, Cli},
    core::genai::GenAiClient,
    samples::{self, SampleContext},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (must be done before config loading)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Initialize crypto provider for TLS connections
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow!("Failed to install default crypto provider"))?;

    let cli = Cli::parse();

    let Some(sample) = samples::get(cli.n) else {
        let program = std::env::args()
            .next()
            .unwrap_or_else(|| "genai-workshop".to_string());
        eprint!("{}", cli::usage(&program, &samples::all()));
        std::process::exit(1);
    };

    // Load configuration from file or environment
    let config = if let Some(config_path) = &cli.config {
        ServerConfig::from_file(config_path).map_err(|e| anyhow!(e.to_string()))?
    } else {
        ServerConfig::from_env().map_err(|e| anyhow!(e.to_string()))?
    };

    let mut stdout = io::stdout();
    cli::write_banner(&mut stdout, &config)?;

    let client_config = config.client_config().map_err(|e| anyhow!(e.to_string()))?;
    let client = GenAiClient::new(client_config)?;

    let ctx = SampleContext {
        client,
        config,
        testdata: cli.testdata,
        output_dir: cli.output_dir,
    };
    sample.run(&ctx, &mut stdout).await
}
