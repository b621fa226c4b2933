//! Wide daily tank-level tables.
//!
//! The first column holds dates, every other column one tank. Rows may
//! arrive in any order; they are sorted, placed on a gap-free daily grid
//! and missing cells are forward-filled from the previous day.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::IoError;
use crate::series::DailySeries;

/// Date layouts accepted in the date column and in holiday files.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d-%m-%Y", "%Y/%m/%d", "%d/%m/%Y"];

/// Configuration for [`read_table`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    delimiter: u8,
    forward_fill: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            forward_fill: true,
        }
    }
}

impl TableConfig {
    /// Sets the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Enables or disables forward-filling of missing cells.
    pub fn with_forward_fill(mut self, forward_fill: bool) -> Self {
        self.forward_fill = forward_fill;
        self
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    pub fn forward_fill(&self) -> bool {
        self.forward_fill
    }
}

/// Named daily columns sharing one date axis.
#[derive(Debug, Clone, PartialEq)]
pub struct TankTable {
    start: NaiveDate,
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl TankTable {
    /// First date of the table.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Number of days (rows after gap filling).
    pub fn n_days(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Column names in file order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The column called `name`, if present.
    pub fn series(&self, name: &str) -> Option<DailySeries> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|j| DailySeries::new(self.start, self.columns[j].clone()))
    }

    /// All columns in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, DailySeries)> + '_ {
        self.names
            .iter()
            .zip(&self.columns)
            .map(|(name, col)| (name.as_str(), DailySeries::new(self.start, col.clone())))
    }
}

/// Reads a tank table from a CSV file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist and any
/// [`parse_table`] error for malformed content.
pub fn read_table(path: &Path, config: &TableConfig) -> Result<TankTable, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path)?;
    let table = parse_table(BufReader::new(file), config)?;
    info!(
        path = %path.display(),
        columns = table.names.len(),
        days = table.n_days(),
        "read tank table"
    );
    Ok(table)
}

/// Parses a tank table from any CSV source.
///
/// Empty cells and `NaN`/`NA`/`null` count as missing.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`IoError::Csv`] | malformed CSV |
/// | [`IoError::NoData`] | no value columns or no rows |
/// | [`IoError::InvalidDate`] | unparseable date cell |
/// | [`IoError::InvalidValue`] | non-numeric value cell |
/// | [`IoError::DuplicateDate`] | two rows share a date |
pub fn parse_table<R: Read>(reader: R, config: &TableConfig) -> Result<TankTable, IoError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let names: Vec<String> = headers.iter().skip(1).map(String::from).collect();
    if names.is_empty() {
        return Err(IoError::NoData);
    }

    let mut rows: Vec<(NaiveDate, Vec<f64>)> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());
        let cell = record.get(0).unwrap_or("");
        let date = parse_date_cell(cell).ok_or_else(|| IoError::InvalidDate {
            line,
            value: cell.to_string(),
        })?;
        let values = names
            .iter()
            .enumerate()
            .map(|(j, name)| {
                let cell = record.get(j + 1).unwrap_or("");
                parse_value_cell(cell).ok_or_else(|| IoError::InvalidValue {
                    line,
                    column: name.clone(),
                    value: cell.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push((date, values));
    }

    rows.sort_by_key(|(date, _)| *date);
    if let Some(pair) = rows.windows(2).find(|w| w[0].0 == w[1].0) {
        return Err(IoError::DuplicateDate { date: pair[0].0 });
    }
    let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
        return Err(IoError::NoData);
    };
    let start = first.0;
    let n_days = (last.0 - start).num_days() as usize + 1;

    let mut columns = vec![vec![f64::NAN; n_days]; names.len()];
    for (date, values) in &rows {
        let t = (*date - start).num_days() as usize;
        for (col, v) in columns.iter_mut().zip(values) {
            col[t] = *v;
        }
    }
    if n_days > rows.len() {
        debug!(missing_days = n_days - rows.len(), "filled calendar gaps");
    }

    if config.forward_fill {
        for col in &mut columns {
            forward_fill(col);
        }
    }

    Ok(TankTable {
        start,
        names,
        columns,
    })
}

/// Replaces each NaN with the closest earlier non-NaN value. Leading NaNs
/// have nothing to copy and stay.
fn forward_fill(values: &mut [f64]) {
    let mut last = None;
    for v in values.iter_mut() {
        if v.is_nan() {
            if let Some(prev) = last {
                *v = prev;
            }
        } else {
            last = Some(*v);
        }
    }
}

/// Parses a date in any of [`DATE_FORMATS`], ignoring a trailing time.
pub(crate) fn parse_date_cell(cell: &str) -> Option<NaiveDate> {
    let day = cell.split([' ', 'T']).next().unwrap_or(cell);
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(day, format).ok())
}

/// `Some(NaN)` for a missing cell, `Some(v)` for a number, `None` otherwise.
fn parse_value_cell(cell: &str) -> Option<f64> {
    if cell.is_empty() || ["nan", "na", "null"].iter().any(|m| cell.eq_ignore_ascii_case(m)) {
        return Some(f64::NAN);
    }
    cell.parse::<f64>().ok()
}
