use std::io::Read;
use std::path::Path;

use thiserror::Error;

use crate::data::organ::OrganTaxonomy;
use crate::data::TimeActivityTable;
use crate::error::DosimetryError;

/// Errors raised while reading tabular input files
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Error encountered when reading CSV data
    #[error("CSV error: {0}")]
    CSVError(String),
    /// The input file does not exist
    #[error("Input file not found: {0}")]
    FileNotFound(String),
    /// The input file exists but could not be opened
    #[error("Cannot open {path}: {message}")]
    Io { path: String, message: String },
    /// Required columns are absent from the header
    #[error("Missing required columns: {0:?}")]
    MissingColumns(Vec<String>),
    /// A cell could not be read as a finite number
    #[error("Non-numeric value {value:?} in column {column} at row {row}")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },
    /// A cell holds a negative number
    #[error("Negative value {value} in column {column} at row {row}")]
    NegativeValue {
        column: String,
        row: usize,
        value: f64,
    },
}

impl ParseError {
    pub(crate) fn io(path: &Path, error: &std::io::Error) -> Self {
        ParseError::Io {
            path: path.display().to_string(),
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for ParseError {
    fn from(e: csv::Error) -> Self {
        ParseError::CSVError(e.to_string())
    }
}

/// Read a time-activity CSV file into a [TimeActivityTable]
///
/// The file must have a `Time_Hours` column and one column per source organ of
/// `taxonomy`, all numeric and non-negative. Extra columns are ignored. Times
/// are hours, activities MBq.
///
/// # Example
///
/// ```rust,no_run
/// use organdose::data::parser::read_time_activity;
/// use organdose::data::ICRP89;
///
/// let table = read_time_activity("input_data.csv", &ICRP89).unwrap();
/// println!("Organs with data: {}", table.len());
/// ```
///
/// # Errors
///
/// Column and cell problems are reported as [`DosimetryError::Parse`]; a
/// time column that is not ascending is reported as
/// [`DosimetryError::InvalidSeries`] for the first organ.
pub fn read_time_activity(
    path: impl AsRef<Path>,
    taxonomy: &OrganTaxonomy,
) -> Result<TimeActivityTable, DosimetryError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ParseError::FileNotFound(path.display().to_string()),
        _ => ParseError::io(path, &e),
    })?;
    tracing::debug!("Reading time-activity data from {}", path.display());
    read_time_activity_reader(file, taxonomy)
}

/// Read time-activity CSV data from any reader, see [read_time_activity]
pub fn read_time_activity_reader<R: Read>(
    reader: R,
    taxonomy: &OrganTaxonomy,
) -> Result<TimeActivityTable, DosimetryError> {
    let mut reader = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().map_err(ParseError::from)?.clone();
    let required = taxonomy.required_columns();
    let mut positions = Vec::with_capacity(required.len());
    let mut missing = Vec::new();
    for column in &required {
        match headers.iter().position(|h| h == column) {
            Some(i) => positions.push(i),
            None => missing.push(column.clone()),
        }
    }
    if !missing.is_empty() {
        return Err(ParseError::MissingColumns(missing).into());
    }

    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); required.len()];
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(ParseError::from)?;
        for (c, &position) in positions.iter().enumerate() {
            let raw = record.get(position).unwrap_or("");
            let value = parse_cell(raw, &required[c], row + 1)?;
            columns[c].push(value);
        }
    }

    let times = &columns[0];
    let organs = required[1..]
        .iter()
        .cloned()
        .zip(columns[1..].iter().cloned());
    let table = TimeActivityTable::from_columns(times, organs)?;
    tracing::debug!(
        "Read {} time points for {} organs",
        times.len(),
        table.len()
    );
    Ok(table)
}

fn parse_cell(raw: &str, column: &str, row: usize) -> Result<f64, ParseError> {
    let value = raw
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseError::NonNumeric {
            column: column.to_string(),
            row,
            value: raw.to_string(),
        })?;
    if value < 0.0 {
        return Err(ParseError::NegativeValue {
            column: column.to_string(),
            row,
            value,
        });
    }
    Ok(value)
}
