//! Delimited-file loading and export.
//!
//! The loader looks up `Nitrogen_Level`, `Rainfall`, `Avg_Temp` and `Yield`
//! by header name. Every other column (`Region`, `Crop_Type`, `Phosphorus`,
//! ...) is passed through untouched so that an export can reproduce the
//! original table with a `Predicted_Yield` column appended.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use ::csv::{ReaderBuilder, StringRecord, WriterBuilder};
use tracing::info;

use super::{Dataset, Feature, Features, Sample, N_FEATURES, TARGET_COLUMN};
use crate::error::{Result, YieldError};

/// Column appended by [`write_with_predictions`].
pub const PREDICTION_COLUMN: &str = "Predicted_Yield";

/// A loaded table: the raw records plus the dataset parsed from them.
#[derive(Debug, Clone)]
pub struct YieldTable {
    headers: Vec<String>,
    records: Vec<StringRecord>,
    dataset: Dataset,
}

impl YieldTable {
    /// Header names in file order.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of columns, passthrough included.
    #[must_use]
    pub fn n_columns(&self) -> usize {
        self.headers.len()
    }

    /// Raw cells of one column, or `None` if the header is absent.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.headers.iter().position(|h| h == name)?;
        Some(
            self.records
                .iter()
                .map(|r| r.get(idx).unwrap_or(""))
                .collect(),
        )
    }

    /// The parsed dataset.
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
}

/// Loads a CSV file with a header row.
///
/// # Errors
///
/// - [`YieldError::DataNotFound`] if the file does not exist
/// - [`YieldError::MissingColumn`] if a required column is absent
/// - [`YieldError::Parse`] if a required cell is not a number
/// - [`YieldError::InvalidDataset`] if a required cell is empty or the file
///   has no data rows
pub fn load_csv(path: impl AsRef<Path>) -> Result<YieldTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => YieldError::DataNotFound(path.to_path_buf()),
        _ => YieldError::Io(e),
    })?;
    let table = read_csv(file)?;
    info!(
        path = %path.display(),
        rows = table.dataset.len(),
        columns = table.headers.len(),
        "loaded yield data"
    );
    Ok(table)
}

/// Parses CSV from any reader. See [`load_csv`].
///
/// # Errors
///
/// Same as [`load_csv`], minus the missing-file case.
pub fn read_csv<R: Read>(reader: R) -> Result<YieldTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(::csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let column_index = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| YieldError::MissingColumn(name.to_string()))
    };
    let feature_idx = Feature::ALL
        .iter()
        .map(|f| column_index(f.column()))
        .collect::<Result<Vec<_>>>()?;
    let target_idx = column_index(TARGET_COLUMN)?;

    let mut records = Vec::new();
    let mut samples = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, ::csv::Position::line);

        let mut values = [0.0; N_FEATURES];
        for (slot, (&idx, feature)) in values.iter_mut().zip(feature_idx.iter().zip(Feature::ALL)) {
            *slot = parse_cell(&record, idx, feature.column(), line)?;
        }
        let crop_yield = parse_cell(&record, target_idx, TARGET_COLUMN, line)?;

        samples.push(Sample::new(Features::from(values), crop_yield));
        records.push(record);
    }

    let dataset = Dataset::new(samples)?;
    Ok(YieldTable {
        headers,
        records,
        dataset,
    })
}

fn parse_cell(record: &StringRecord, idx: usize, column: &str, line: u64) -> Result<f64> {
    let raw = record.get(idx).unwrap_or("");
    if raw.is_empty() {
        return Err(YieldError::invalid_dataset(format!(
            "line {line}: {column} is missing"
        )));
    }
    raw.parse::<f64>().map_err(|_| YieldError::Parse {
        line,
        column: column.to_string(),
        value: raw.to_string(),
    })
}

/// Writes `table` with a `Predicted_Yield` column holding `predictions`.
///
/// An existing `Predicted_Yield` column is overwritten in place rather than
/// duplicated.
///
/// # Errors
///
/// Returns [`YieldError::InvalidDataset`] if `predictions` does not have one
/// value per row, or a CSV/I/O error if writing fails.
pub fn write_with_predictions<W: Write>(
    table: &YieldTable,
    predictions: &[f64],
    writer: W,
) -> Result<()> {
    if predictions.len() != table.records.len() {
        return Err(YieldError::invalid_dataset(format!(
            "{} predictions for {} rows",
            predictions.len(),
            table.records.len()
        )));
    }

    let existing = table.headers.iter().position(|h| h == PREDICTION_COLUMN);
    let mut writer = WriterBuilder::new().from_writer(writer);

    let mut header: Vec<&str> = table.headers.iter().map(String::as_str).collect();
    if existing.is_none() {
        header.push(PREDICTION_COLUMN);
    }
    writer.write_record(&header)?;

    for (record, prediction) in table.records.iter().zip(predictions) {
        let prediction = prediction.to_string();
        let mut row: Vec<&str> = record.iter().collect();
        match existing {
            Some(idx) => row[idx] = &prediction,
            None => row.push(&prediction),
        }
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

/// File-path variant of [`write_with_predictions`].
///
/// # Errors
///
/// Same as [`write_with_predictions`], plus file creation failures.
pub fn export_with_predictions(
    table: &YieldTable,
    predictions: &[f64],
    path: impl AsRef<Path>,
) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_with_predictions(table, predictions, file)?;
    info!(path = %path.as_ref().display(), rows = predictions.len(), "exported predictions");
    Ok(())
}

#[cfg(test)]
#[path = "csv_tests.rs"]
mod tests;
