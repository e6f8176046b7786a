use std::error::Error;
use std::io;
use std::time::Instant;

use log::{error, warn};

use tx_synth::config::SynthConfig;
use tx_synth::summary::Summary;
use tx_synth::synthesizer::Synthesizer;
use tx_synth::writer::write_transactions;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = SynthConfig {
        count: 100_000,
        seed: Some(0),
        ..SynthConfig::default()
    };
    let mut synthesizer = Synthesizer::new(config)?;

    let start = Instant::now();
    let transactions = synthesizer.generate()?;
    let elapsed = start.elapsed();
    error!("Generation took: {:.2?}", elapsed);

    let start_writing = Instant::now();
    write_transactions(io::sink(), &transactions)?;
    let elapsed_writing = start_writing.elapsed();
    warn!("Writing took: {:.2?}", elapsed_writing);

    let start_summary = Instant::now();
    let summary = Summary::from_transactions(&transactions);
    warn!(
        "Summarizing {} transactions took: {:.2?}",
        summary.count,
        start_summary.elapsed()
    );

    warn!("Total took: {:.2?}", start.elapsed());

    Ok(())
}
