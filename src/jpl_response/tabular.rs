//! Parsing of the `$$SOE` / `$$EOE` data block into a grid of cells.
use csv::{ReaderBuilder, Trim};
use itertools::Itertools;

use crate::eph_errors::EphError;
use crate::table::Cell;

/// Separator between the cells of a data line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnDelimiter {
    /// `CSV_FORMAT = YES`
    Comma,
    /// `CSV_FORMAT = NO`, cells separated by runs of whitespace
    Whitespace,
}

impl ColumnDelimiter {
    fn is_delimiter(&self, c: char) -> bool {
        match self {
            ColumnDelimiter::Comma => c == ',',
            ColumnDelimiter::Whitespace => c.is_whitespace(),
        }
    }
}

/// Strip the leading and trailing whitespace and delimiter characters of a line.
fn trim_edges(line: &str, delimiter: ColumnDelimiter) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || delimiter.is_delimiter(c))
}

/// Read comma-separated records with the `csv` crate.
///
/// Records may have different lengths here; the caller decides what a ragged grid means.
fn read_comma_records(text: &str) -> Result<Vec<Vec<String>>, EphError> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes())
        .records()
        .map(|record| -> Result<Vec<String>, EphError> {
            Ok(record?.iter().map(str::to_string).collect())
        })
        .collect()
}

/// Split one data line into trimmed cells.
///
/// Leading and trailing whitespace and delimiter characters are removed first, so the
/// trailing `,` Horizons writes at the end of each CSV line does not produce an empty cell.
/// Comma-separated lines are then read as a CSV record, so a cell that opens with a quote
/// may hold a comma.
///
/// Examples
/// --------
/// ```rust
/// use eph::jpl_response::tabular::{parse_row, ColumnDelimiter};
/// assert_eq!(parse_row(" 1, a ,2,", ColumnDelimiter::Comma).unwrap(), vec!["1", "a", "2"]);
/// assert_eq!(parse_row("  1   a 2 ", ColumnDelimiter::Whitespace).unwrap(), vec!["1", "a", "2"]);
/// ```
pub fn parse_row(line: &str, delimiter: ColumnDelimiter) -> Result<Vec<String>, EphError> {
    let line = trim_edges(line, delimiter);
    if line.is_empty() {
        return Ok(Vec::new());
    }
    match delimiter {
        ColumnDelimiter::Comma => Ok(read_comma_records(line)?
            .into_iter()
            .next()
            .unwrap_or_default()),
        ColumnDelimiter::Whitespace => Ok(line.split_whitespace().map(str::to_string).collect()),
    }
}

/// Split a data block into rows of cells.
///
/// Arguments
/// ---------
/// * `block`: the text between the `$$SOE` and `$$EOE` markers
/// * `delimiter`: the cell delimiter in use for this response
///
/// Return
/// ------
/// * the row-major grid, empty for an empty block, or [`EphError::ParseError`] when the rows
///   do not all have the same number of cells.
pub fn parse_block(block: &str, delimiter: ColumnDelimiter) -> Result<Vec<Vec<String>>, EphError> {
    let block = block.trim();
    if block.is_empty() {
        return Ok(Vec::new());
    }

    let grid: Vec<Vec<String>> = match delimiter {
        ColumnDelimiter::Comma => {
            let cleaned = block.lines().map(|line| trim_edges(line, delimiter)).join("\n");
            read_comma_records(&cleaned)?
        }
        ColumnDelimiter::Whitespace => block
            .lines()
            .map(|line| parse_row(line, delimiter))
            .collect::<Result<_, _>>()?,
    };

    let width = grid.first().map_or(0, Vec::len);
    if let Some((index, row)) = grid.iter().enumerate().find(|(_, row)| row.len() != width) {
        return Err(EphError::ParseError(format!(
            "row {} holds {} cells while the first row holds {} ({:?} delimiter)",
            index + 1,
            row.len(),
            width,
            delimiter
        )));
    }
    Ok(grid)
}

/// Conversion of strings, or nested sequences of strings, into [`Cell`]s.
///
/// The shape of the input is preserved; each leaf becomes [`Cell::Numeric`] when it parses as
/// a float and stays [`Cell::Text`] otherwise.
pub trait Numberify {
    type Output;

    fn numberify(self) -> Self::Output;
}

impl Numberify for String {
    type Output = Cell;

    fn numberify(self) -> Cell {
        match self.trim().parse::<f64>() {
            Ok(x) => Cell::Numeric(x),
            Err(_) => Cell::Text(self),
        }
    }
}

impl Numberify for &str {
    type Output = Cell;

    fn numberify(self) -> Cell {
        self.to_string().numberify()
    }
}

impl<T: Numberify> Numberify for Vec<T> {
    type Output = Vec<T::Output>;

    fn numberify(self) -> Self::Output {
        self.into_iter().map(Numberify::numberify).collect()
    }
}

pub fn numberify<T: Numberify>(value: T) -> T::Output {
    value.numberify()
}

/// Turn a row-major grid into a column-major one.
///
/// Return
/// ------
/// * the columns, or [`EphError::ParseError`] when a row is not as wide as the first one.
pub fn transpose<T: Clone>(grid: &[Vec<T>]) -> Result<Vec<Vec<T>>, EphError> {
    let width = grid.first().map_or(0, Vec::len);
    if let Some(index) = grid.iter().position(|row| row.len() != width) {
        return Err(EphError::ParseError(format!(
            "cannot transpose: row {} holds {} cells, expected {}",
            index + 1,
            grid[index].len(),
            width
        )));
    }
    Ok((0..width)
        .map(|col| grid.iter().map(|row| row[col].clone()).collect())
        .collect())
}
