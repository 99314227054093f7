//! Splitting of a raw Horizons response into its sections.
//!
//! A successful response reads
//!
//! ```text
//! <header>
//! *******
//! <column names>
//! *******
//! $$SOE
//! <data lines>
//! $$EOE
//! <footer, ending with the echoed parameters after !$$SOF>
//! ```
//!
//! while a rejected request comes back with status 200 and only
//! `<problem description>!$$SOF\n<PARAM = value lines>`.
use std::sync::LazyLock;

use regex::Regex;

use super::tabular::ColumnDelimiter;
use crate::constants::{EchoedParams, EOE_MARKER, SOE_MARKER, SOF_MARKER, YES};
use crate::eph_errors::EphError;
use crate::horizons::param_value::{yes_or_no, ParamValue};

static SUBSECTION_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*{3,}").expect("subsection regex is valid"));

static ECHOED_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\S*)\s=\s(\S*)").expect("echoed parameter regex is valid"));

fn strip_decoration(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '*')
}

/// The two shapes a Horizons response can take.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseSections {
    /// Markers found: an ephemeris was produced.
    Ephemeris {
        header: String,
        data: String,
        footer: String,
    },
    /// Markers absent: the service refused the request.
    Rejected {
        problem: String,
        echoed_params: EchoedParams,
    },
}

impl ResponseSections {
    /// Classify `source` without failing on a rejection.
    pub fn from_source(source: &str) -> Self {
        let markers = source.find(SOE_MARKER).and_then(|soe| {
            let data_start = soe + SOE_MARKER.len();
            source[data_start..]
                .find(EOE_MARKER)
                .map(|eoe| (soe, data_start, data_start + eoe))
        });

        match markers {
            Some((soe, data_start, eoe)) => ResponseSections::Ephemeris {
                header: strip_decoration(&source[..soe]).to_string(),
                data: strip_decoration(&source[data_start..eoe]).to_string(),
                footer: strip_decoration(&source[eoe + EOE_MARKER.len()..]).to_string(),
            },
            None => {
                let problem = match source.find(SOF_MARKER) {
                    Some(sof) => &source[..sof],
                    None => source,
                };
                ResponseSections::Rejected {
                    problem: problem.trim().to_string(),
                    echoed_params: parse_echoed_params(source).unwrap_or_default(),
                }
            }
        }
    }
}

/// Split a response into `(header, data, footer)`.
///
/// Each section is trimmed of whitespace and of the decorative `*` runs around it.
///
/// Return
/// ------
/// * the three sections, or [`EphError::BadRequest`] carrying the problem description and the
///   echoed parameters when the `$$SOE` / `$$EOE` markers are absent.
pub fn split_sections(source: &str) -> Result<(String, String, String), EphError> {
    match ResponseSections::from_source(source) {
        ResponseSections::Ephemeris {
            header,
            data,
            footer,
        } => Ok((header, data, footer)),
        ResponseSections::Rejected {
            problem,
            echoed_params,
        } => Err(EphError::BadRequest {
            message: problem,
            echoed_params,
        }),
    }
}

/// Split a block on runs of three or more `*`, trimming every piece.
pub fn split_subsections(text: &str) -> Vec<String> {
    SUBSECTION_SEPARATOR
        .split(text)
        .map(|piece| piece.trim().to_string())
        .collect()
}

/// The `KEY = value` pairs echoed after the `!$$SOF` marker.
///
/// Return
/// ------
/// * `None` when the response holds no `!$$SOF` marker.
pub fn parse_echoed_params(source: &str) -> Option<EchoedParams> {
    let sof = source.rfind(SOF_MARKER)?;
    let echoed = source[sof + SOF_MARKER.len()..].trim();
    Some(
        ECHOED_PARAM
            .captures_iter(echoed)
            .map(|caps| (caps[1].to_string(), caps[2].to_string()))
            .collect(),
    )
}

/// Whether the echoed parameters of `source` ask for comma-separated output.
///
/// A missing `CSV_FORMAT` entry reads as `NO`, the service default. The echoed value is
/// read with the same yes/no rules as request values, so `'yes'`, `"YES"` or `Y` all select
/// the comma delimiter.
///
/// Return
/// ------
/// * [`EphError::ParseError`] when `source` echoes no parameters at all, or echoes a
///   `CSV_FORMAT` that is neither yes nor no: the delimiter is then unknown and is not guessed.
pub fn check_delimited_format(source: &str) -> Result<bool, EphError> {
    let echoed = parse_echoed_params(source).ok_or_else(|| {
        EphError::ParseError(format!(
            "no echoed parameters ({SOF_MARKER}) found, cannot tell the column delimiter"
        ))
    })?;
    let Some(value) = echoed.get("CSV_FORMAT") else {
        return Ok(false);
    };
    yes_or_no(&ParamValue::from(value.as_str()))
        .map(|flag| flag == YES)
        .ok_or_else(|| {
            EphError::ParseError(format!(
                "echoed CSV_FORMAT {value:?} is neither yes nor no, cannot tell the column delimiter"
            ))
        })
}

/// Column delimiter used by the data block of `source`.
pub fn column_delimiter(source: &str) -> Result<ColumnDelimiter, EphError> {
    Ok(if check_delimited_format(source)? {
        ColumnDelimiter::Comma
    } else {
        ColumnDelimiter::Whitespace
    })
}
