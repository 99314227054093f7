//! # Horizons responses
//!
//! [`JplResponse`] wraps the status and text body returned by the service and turns it into an
//! [`EphemTable`]:
//!
//! ```text
//! raw text
//!   → split_sections            (sections)   ── markers absent ──▶ BadRequest
//!   → column names, metadata    (header)
//!   → output units              (header)
//!   → delimiter from CSV_FORMAT (sections)   ── no echo ──▶ ParseError
//!   → parse_block → numberify → transpose  (tabular)
//!   → assemble                  (header)
//! ```
//!
//! Each step fails with a typed [`EphError`]; nothing is retried nor recovered silently.
use tracing::{debug, warn};

use crate::constants::EchoedParams;
use crate::eph_errors::EphError;
use crate::table::EphemTable;

pub mod header;
pub mod sections;
pub mod tabular;

use header::{assemble, parse_column_names, parse_metadata, resolve_units};
use sections::{column_delimiter, parse_echoed_params, ResponseSections};
use tabular::{numberify, parse_block, transpose};

/// A response of the Horizons batch interface, fully buffered.
#[derive(Debug, Clone, PartialEq)]
pub struct JplResponse {
    pub status: u16,
    pub body: String,
}

impl JplResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        JplResponse {
            status,
            body: body.into(),
        }
    }

    /// The text of the response as sent by the service.
    pub fn raw(&self) -> &str {
        &self.body
    }

    pub fn sections(&self) -> ResponseSections {
        ResponseSections::from_source(&self.body)
    }

    /// Header section, `None` for a rejected request.
    pub fn header(&self) -> Option<String> {
        match self.sections() {
            ResponseSections::Ephemeris { header, .. } => Some(header),
            ResponseSections::Rejected { .. } => None,
        }
    }

    /// Data section, `None` for a rejected request.
    pub fn data(&self) -> Option<String> {
        match self.sections() {
            ResponseSections::Ephemeris { data, .. } => Some(data),
            ResponseSections::Rejected { .. } => None,
        }
    }

    /// Footer section, `None` for a rejected request.
    pub fn footer(&self) -> Option<String> {
        match self.sections() {
            ResponseSections::Ephemeris { footer, .. } => Some(footer),
            ResponseSections::Rejected { .. } => None,
        }
    }

    /// Parameters echoed by the service, empty when it echoed none.
    pub fn echoed_params(&self) -> EchoedParams {
        parse_echoed_params(&self.body).unwrap_or_default()
    }

    /// Parse the response into a table.
    ///
    /// Return
    /// ------
    /// * the table with units attached to dimensioned columns,
    /// * [`EphError::BadRequest`] if the service rejected the request,
    /// * [`EphError::ParseError`] if the response cannot be read as a table.
    pub fn parse(&self) -> Result<EphemTable, EphError> {
        parse(&self.body)
    }
}

/// Parse the text of a Horizons response into a table, see [`JplResponse::parse`].
pub fn parse(source: &str) -> Result<EphemTable, EphError> {
    let (header, data, footer) = match ResponseSections::from_source(source) {
        ResponseSections::Ephemeris {
            header,
            data,
            footer,
        } => (header, data, footer),
        ResponseSections::Rejected {
            problem,
            echoed_params,
        } => {
            warn!(problem = %problem, "Horizons rejected the request");
            return Err(EphError::BadRequest {
                message: problem,
                echoed_params,
            });
        }
    };
    debug!(
        header_len = header.len(),
        data_len = data.len(),
        footer_len = footer.len(),
        "response split in sections"
    );

    let names = parse_column_names(&header)?;
    let meta = parse_metadata(&header);
    let units = resolve_units(&meta)?;

    let delimiter = column_delimiter(&footer)?;
    debug!(?delimiter, columns = names.len(), "column delimiter selected");

    let grid = parse_block(&data, delimiter)?;
    if let Some(row) = grid.first() {
        if row.len() != names.len() {
            return Err(EphError::ParseError(format!(
                "data rows hold {} cells for {} column names, check CSV_FORMAT",
                row.len(),
                names.len()
            )));
        }
    }
    debug!(rows = grid.len(), columns = names.len(), "data block parsed");

    let columns = transpose(&numberify(grid))?;
    assemble(columns, names, meta, units.as_ref())
}
