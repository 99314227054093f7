//! Serialization of an [`EphemTable`] as delimited text.
use std::io::Write;
use std::str::FromStr;

use csv::{QuoteStyle, WriterBuilder};

use super::EphemTable;
use crate::eph_errors::EphError;

/// Text layout used when writing a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Comma-separated values
    Csv,
    /// Space-separated values, cells with spaces are double quoted
    #[default]
    Ascii,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "ascii" => Ok(OutputFormat::Ascii),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

impl EphemTable {
    /// Write the column names then one line per row.
    pub fn write<W: Write>(&self, writer: W, format: OutputFormat) -> Result<(), EphError> {
        let delimiter = match format {
            OutputFormat::Csv => b',',
            OutputFormat::Ascii => b' ',
        };
        let mut out = WriterBuilder::new()
            .delimiter(delimiter)
            .quote_style(QuoteStyle::Necessary)
            .from_writer(writer);

        out.write_record(self.colnames())?;
        for row in self.rows() {
            out.write_record(row.iter().map(|cell| cell.to_string()))?;
        }
        out.flush()?;
        Ok(())
    }

    /// The table rendered with [`EphemTable::write`].
    pub fn to_text(&self, format: OutputFormat) -> Result<String, EphError> {
        let mut buffer = Vec::new();
        self.write(&mut buffer, format)?;
        String::from_utf8(buffer).map_err(|e| EphError::ParseError(e.to_string()))
    }
}
