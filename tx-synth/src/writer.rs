use std::io;
use std::path::Path;

use csv::WriterBuilder;
use log::info;

use crate::error::SynthError;
use crate::transaction::{Transaction, CSV_HEADER};

/// Writes the header row followed by one row per transaction.
///
/// The header is written explicitly so that an empty batch still yields a
/// header-only file.
///
/// # Errors
/// Errors when serialization or the underlying writer fails
pub fn write_transactions<W: io::Write>(
    writer: W,
    transactions: &[Transaction],
) -> Result<(), SynthError> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for transaction in transactions {
        wtr.serialize(transaction)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Creates (or truncates) the file at `path` and writes `transactions` into it.
///
/// # Errors
/// Errors when the parent directory is missing or not writable, or on any write failure
pub fn write_csv_file<P: AsRef<Path>>(
    path: P,
    transactions: &[Transaction],
) -> Result<(), SynthError> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    write_transactions(file, transactions)?;
    info!(
        "Wrote {} transactions to {}",
        transactions.len(),
        path.display()
    );
    Ok(())
}
