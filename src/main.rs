use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use store_scraper::config::ScraperConfig;
use store_scraper::envelope::SourceEnvelope;
use store_scraper::logging;
use store_scraper::pipeline::processing::NormalizationPipeline;
use store_scraper::pipeline::{process_envelope, RunSummary};
use store_scraper::sink::JsonLinesSink;

#[derive(Parser)]
#[command(name = "store_scraper")]
#[command(about = "Store location data normalization pipeline")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize fetched source envelopes into canonical store records
    Process {
        /// Input file with one fetched source envelope (JSON) per line
        #[arg(long)]
        input: PathBuf,
        /// Output file for canonical records, one JSON object per line
        #[arg(long, default_value = "output/stores.jsonl")]
        output: PathBuf,
        /// Path to the TOML configuration file (defaults to
        /// $STORE_SCRAPER_CONFIG, or built-in defaults when unset)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    match cli.command {
        Commands::Process {
            input,
            output,
            config,
        } => process(input, output, config),
    }
}

fn process(input: PathBuf, output: PathBuf, config: Option<PathBuf>) -> anyhow::Result<()> {
    let config_path =
        config.or_else(|| std::env::var("STORE_SCRAPER_CONFIG").ok().map(PathBuf::from));
    let config = match config_path {
        Some(path) => ScraperConfig::load(&path)?,
        None => ScraperConfig::default(),
    };

    let pipeline = NormalizationPipeline::new(config);
    info!(run_id = %pipeline.run().run_id, input = %input.display(), "starting normalization run");

    let mut sink = JsonLinesSink::create(&output)?;
    let reader = BufReader::new(File::open(&input)?);
    let mut summary = RunSummary::default();
    let mut malformed_envelopes = 0usize;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let envelope: SourceEnvelope = match serde_json::from_str(&line) {
            Ok(envelope) => envelope,
            Err(e) => {
                // Malformed envelopes are the fetch layer's failure to own;
                // skip the line and keep the run alive.
                error!(line = line_no + 1, "failed to parse source envelope: {}", e);
                malformed_envelopes += 1;
                continue;
            }
        };
        summary.absorb(process_envelope(&pipeline, &envelope, &mut sink)?);
    }
    sink.flush()?;

    println!("Run complete:");
    println!("   Raw records:          {}", summary.total_records);
    println!("   Emitted:              {}", summary.emitted);
    println!("   Rejected (invalid):   {}", summary.rejected_invalid);
    println!("   Rejected (duplicate): {}", summary.rejected_duplicate);
    if malformed_envelopes > 0 {
        println!("   Malformed envelopes:  {}", malformed_envelopes);
    }
    println!("   Output file:          {}", output.display());
    Ok(())
}
