use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;
use log::info;

use tx_synth::config::SynthConfig;
use tx_synth::summary::Summary;
use tx_synth::synthesizer::Synthesizer;
use tx_synth::writer::write_csv_file;

const RULE_WIDTH: usize = 60;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Where to write the generated CSV, overwritten if it exists
    #[clap(short, long, default_value = "data/transactions.csv")]
    pub(crate) output: PathBuf,
    /// How many transactions to generate
    #[clap(short = 'n', long)]
    pub(crate) count: Option<usize>,
    /// Seed for reproducible output
    #[clap(long)]
    pub(crate) seed: Option<u64>,
}

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = SynthConfig::default();
    if let Some(count) = cli.count {
        config.count = count;
    }
    config.seed = cli.seed;

    println!("{}", rule());
    println!("PERSONAL FINANCE DATA GENERATOR");
    println!("{}", rule());
    println!("Generating {} transactions...", config.count);
    println!(
        "Date range: {} to {}",
        config.start_date.format("%Y-%m-%d"),
        config.end_date.format("%Y-%m-%d")
    );
    println!();

    let mut synthesizer = Synthesizer::new(config)?;
    let transactions = synthesizer.generate()?;

    info!("Saving to CSV file...");
    write_csv_file(&cli.output, &transactions)?;
    println!("Successfully created {}", cli.output.display());
    println!();

    println!("{}", rule());
    println!("SUMMARY STATISTICS");
    println!("{}", rule());
    print!("{}", Summary::from_transactions(&transactions));
    println!();
    println!("{}", rule());
    println!("Data generation complete!");
    println!("{}", rule());

    Ok(())
}
