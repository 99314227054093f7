//! Column names, metadata and units recovered from a Horizons header.
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::sections::split_subsections;
use super::tabular::{parse_row, ColumnDelimiter};
use crate::constants::Metadata;
use crate::eph_errors::EphError;
use crate::horizons::dimensions::{column_dimension, Dimension};
use crate::table::{Cell, EphemTable};
use crate::units::{BaseUnit, Unit};

/// Metadata label holding the `<space>-<time>` unit pair.
pub const OUTPUT_UNITS: &str = "Output units";

/// Labels whose value is reduced to its first word, lowercased.
const BODY_NAME_LABELS: [&str; 2] = ["Target body name", "Center body name"];

static META_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.*?\D):\s(.*)").expect("metadata regex is valid"));

/// Column names found on the last `*`-separated subsection of the header.
///
/// Return
/// ------
/// * the names in order, or [`EphError::ParseError`] when that subsection is empty.
pub fn parse_column_names(header: &str) -> Result<Vec<String>, EphError> {
    let subsections = split_subsections(header);
    let last = subsections.last().map(String::as_str).unwrap_or_default();
    let names = parse_row(last, ColumnDelimiter::Comma)?;
    if names.is_empty() {
        return Err(EphError::ParseError(
            "no column names found in the response header".into(),
        ));
    }
    Ok(names)
}

/// Collect the `Label: value` lines of the header.
///
/// A label seen twice keeps its first position and its last value.
pub fn parse_metadata(header: &str) -> Metadata {
    let mut meta: Metadata = META_LINE
        .captures_iter(header)
        .map(|caps| (caps[1].trim().to_string(), caps[2].trim().to_string()))
        .collect();

    for label in BODY_NAME_LABELS {
        if let Some(value) = meta.get_mut(label) {
            *value = value
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_lowercase();
        }
    }
    meta
}

/// Unit attached to each [`Dimension`] for one response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionUnits {
    pub jd: Unit,
    pub time: Unit,
    pub space: Unit,
    pub velocity: Unit,
    pub angle: Unit,
    pub angular_velocity: Unit,
}

impl DimensionUnits {
    /// Units derived from a space and a time unit. Epochs stay in days and angles in degrees.
    pub fn new(space: BaseUnit, time: BaseUnit) -> Self {
        DimensionUnits {
            jd: BaseUnit::Day.into(),
            time: time.into(),
            space: space.into(),
            velocity: space / time,
            angle: BaseUnit::Degree.into(),
            angular_velocity: BaseUnit::Degree / time,
        }
    }

    pub fn get(&self, dimension: Dimension) -> Unit {
        match dimension {
            Dimension::JD => self.jd,
            Dimension::Time => self.time,
            Dimension::Space => self.space,
            Dimension::Velocity => self.velocity,
            Dimension::Angle => self.angle,
            Dimension::AngularVelocity => self.angular_velocity,
        }
    }
}

/// Units of the response described by `meta`.
///
/// The `Output units` entry reads `<space>-<time>[, ...]`, e.g. `KM-S` or `AU-D, deg, Julian
/// Day Number (Tp)`; only the leading pair matters.
///
/// Return
/// ------
/// * `Ok(None)` when the entry is absent, [`EphError::ParseError`] when it is malformed.
pub fn resolve_units(meta: &Metadata) -> Result<Option<DimensionUnits>, EphError> {
    let Some(raw) = meta.get(OUTPUT_UNITS) else {
        return Ok(None);
    };
    let pair = raw.split(',').next().unwrap_or_default().to_lowercase();
    let (space, time) = pair.trim().split_once('-').ok_or_else(|| {
        EphError::ParseError(format!("output units '{raw}' are not of the form <space>-<time>"))
    })?;
    Ok(Some(DimensionUnits::new(space.parse()?, time.parse()?)))
}

/// Build the final table from column-major cells.
///
/// Arguments
/// ---------
/// * `columns`: the transposed, numberified data block
/// * `names`: the column names, one per column
/// * `meta`: the header metadata, kept as table metadata
/// * `units`: the resolved units; `None` leaves every column dimensionless
///
/// Return
/// ------
/// * the table, or [`EphError::ParseError`] when names and columns disagree.
pub fn assemble(
    columns: Vec<Vec<Cell>>,
    names: Vec<String>,
    meta: Metadata,
    units: Option<&DimensionUnits>,
) -> Result<EphemTable, EphError> {
    let mut table = EphemTable::from_columns(names.clone(), columns, meta)?;

    let Some(units) = units else {
        debug!("no output units in the header, table left dimensionless");
        return Ok(table);
    };
    for name in &names {
        if let Some(dimension) = column_dimension(name) {
            table.set_unit(name, Some(units.get(dimension)))?;
        }
    }
    Ok(table)
}
