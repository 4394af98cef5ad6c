use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use tosfx::cli::{init_tracing, Cli};
use tosfx::config::{FileConfig, Settings};
use tosfx::record::{read_records, write_records};
use tosfx::sender::IngestClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let file_config = FileConfig::load_or_default(&cli.config)?;
    let settings = Settings::resolve(cli.options(), &file_config)?;

    let records = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            read_records(BufReader::new(file))?
        }
        None => read_records(io::stdin().lock())?,
    };

    let client = IngestClient::new()?;
    let out = tosfx::transform(records, &settings, &client).await?;

    write_records(io::stdout().lock(), &out)?;
    Ok(())
}
