//! CSV export of a dataset
//!
//! Writes the header list followed by every row in order. Cells a row does
//! not carry are written empty.

use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::app::models::Dataset;
use crate::{Error, Result};

/// Write a dataset as CSV to any writer, returning the number of data rows
pub fn write_dataset_to<W: Write>(dataset: &Dataset, writer: W) -> Result<usize> {
    let mut csv_writer = csv::WriterBuilder::new().flexible(false).from_writer(writer);

    csv_writer.write_record(dataset.headers())?;
    for row in dataset.rows() {
        csv_writer.write_record(
            dataset
                .headers()
                .iter()
                .map(|header| row.get(header).unwrap_or("")),
        )?;
    }

    csv_writer
        .flush()
        .map_err(|e| Error::io("Failed to flush CSV output", e))?;
    Ok(dataset.len())
}

/// Write a dataset to a CSV file, replacing any existing file
pub fn write_dataset(dataset: &Dataset, path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path)
        .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;

    let written = write_dataset_to(dataset, std::io::BufWriter::new(file))?;
    info!("Exported {} rows to {}", written, path.display());
    Ok(written)
}
