//! # Ephemeris tables
//!
//! [`EphemTable`] is the typed artifact produced by parsing a Horizons response: named columns
//! of [`Cell`]s, an optional physical [`Unit`] per column and the free-form metadata recovered
//! from the response header.
//!
//! ## Invariants
//!
//! - every column holds the same number of cells (the table is rectangular),
//! - column order is the order of the Horizons column-name line.
//!
//! ## Operations
//!
//! - lookup by name, numeric view of a column ([`EphemTable::values`]),
//! - unit conversion of a dimensioned column ([`EphemTable::convert_column`]),
//! - state vectors from `X/Y/Z` and `VX/VY/VZ` columns as [`nalgebra::Vector3`],
//! - [`EphemTable::join`] on key columns (see [`join`]) and serialization (see [`writer`]).
use std::fmt;

use nalgebra::Vector3;

use crate::constants::Metadata;
use crate::eph_errors::EphError;
use crate::units::Unit;

pub mod join;
pub mod writer;

/// A table cell: numeric when the source text converts to a float, the original text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Numeric(f64),
    Text(String),
}

impl Cell {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Numeric(x) => Some(*x),
            Cell::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Numeric(_) => None,
            Cell::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Numeric(x) => {
                let magnitude = x.abs();
                if *x == 0.0 || (1e-4..1e16).contains(&magnitude) {
                    write!(f, "{x}")
                } else {
                    write!(f, "{x:e}")
                }
            }
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Cell {
    fn from(x: f64) -> Self {
        Cell::Numeric(x)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

/// A named column with an optional unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
    pub unit: Option<Unit>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Column {
            name: name.into(),
            cells,
            unit: None,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EphemTable {
    columns: Vec<Column>,
    meta: Metadata,
}

impl EphemTable {
    /// Build a table from column-major data.
    ///
    /// Arguments
    /// ---------
    /// * `names`: the column names, one per column of `data`
    /// * `data`: the cells of each column
    /// * `meta`: table-level metadata
    ///
    /// Return
    /// ------
    /// * the table, or [`EphError::ParseError`] when the names do not match the columns or the
    ///   columns have different lengths.
    pub fn from_columns(
        names: Vec<String>,
        data: Vec<Vec<Cell>>,
        meta: Metadata,
    ) -> Result<Self, EphError> {
        // an empty data block still yields the named, empty columns
        let data = if data.is_empty() {
            vec![Vec::new(); names.len()]
        } else {
            data
        };

        if names.len() != data.len() {
            return Err(EphError::ParseError(format!(
                "found {} column names for {} data columns",
                names.len(),
                data.len()
            )));
        }

        let n_rows = data.first().map_or(0, Vec::len);
        if let Some(bad) = data.iter().position(|col| col.len() != n_rows) {
            return Err(EphError::ParseError(format!(
                "column '{}' holds {} cells, expected {}",
                names[bad],
                data[bad].len(),
                n_rows
            )));
        }

        let columns = names
            .into_iter()
            .zip(data)
            .map(|(name, cells)| Column::new(name, cells))
            .collect();
        Ok(EphemTable { columns, meta })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn colnames(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn meta(&self) -> &Metadata {
        &self.meta
    }

    pub fn meta_mut(&mut self) -> &mut Metadata {
        &mut self.meta
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    fn column_mut(&mut self, name: &str) -> Result<&mut Column, EphError> {
        self.columns
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| EphError::MissingColumn(name.to_string()))
    }

    pub fn unit(&self, name: &str) -> Option<Unit> {
        self.column(name).and_then(|c| c.unit)
    }

    pub fn set_unit(&mut self, name: &str, unit: Option<Unit>) -> Result<(), EphError> {
        self.column_mut(name)?.unit = unit;
        Ok(())
    }

    /// Cells of row `index`, in column order.
    pub fn row(&self, index: usize) -> Option<Vec<&Cell>> {
        (index < self.n_rows()).then(|| self.columns.iter().map(|c| &c.cells[index]).collect())
    }

    pub fn rows(&self) -> impl Iterator<Item = Vec<&Cell>> + '_ {
        (0..self.n_rows()).map(move |i| self.columns.iter().map(|c| &c.cells[i]).collect())
    }

    /// Numeric values of a column.
    ///
    /// Return
    /// ------
    /// * [`EphError::MissingColumn`] if no such column, [`EphError::ParseError`] if a cell is text.
    pub fn values(&self, name: &str) -> Result<Vec<f64>, EphError> {
        let column = self
            .column(name)
            .ok_or_else(|| EphError::MissingColumn(name.to_string()))?;
        column
            .cells
            .iter()
            .map(|cell| {
                cell.as_f64().ok_or_else(|| {
                    EphError::ParseError(format!("non numeric cell '{cell}' in column {name}"))
                })
            })
            .collect()
    }

    /// Re-express a dimensioned column in `target`, scaling its numeric cells.
    ///
    /// Return
    /// ------
    /// * [`EphError::ParseError`] when the column has no unit or `target` measures another kind
    ///   of quantity.
    pub fn convert_column(&mut self, name: &str, target: Unit) -> Result<(), EphError> {
        let column = self.column_mut(name)?;
        let unit = column
            .unit
            .ok_or_else(|| EphError::ParseError(format!("column {name} has no unit")))?;
        let factor = unit.conversion_factor(&target).ok_or_else(|| {
            EphError::ParseError(format!("cannot convert column {name} from {unit} to {target}"))
        })?;
        for cell in column.cells.iter_mut() {
            if let Cell::Numeric(x) = cell {
                *x *= factor;
            }
        }
        column.unit = Some(target);
        Ok(())
    }

    pub fn rename_column(&mut self, old: &str, new: impl Into<String>) -> Result<(), EphError> {
        self.column_mut(old)?.name = new.into();
        Ok(())
    }

    /// The first `n` rows of the table.
    pub fn head(&self, n: usize) -> EphemTable {
        let columns = self
            .columns
            .iter()
            .map(|c| Column {
                name: c.name.clone(),
                cells: c.cells.iter().take(n).cloned().collect(),
                unit: c.unit,
            })
            .collect();
        EphemTable {
            columns,
            meta: self.meta.clone(),
        }
    }

    fn vectors(&self, names: [&str; 3]) -> Result<Vec<Vector3<f64>>, EphError> {
        let [x, y, z] = names.map(|name| self.values(name));
        let (x, y, z) = (x?, y?, z?);
        Ok(x.into_iter()
            .zip(y)
            .zip(z)
            .map(|((x, y), z)| Vector3::new(x, y, z))
            .collect())
    }

    /// Position vectors from the `X`, `Y`, `Z` columns, in the unit of those columns.
    pub fn position_vectors(&self) -> Result<Vec<Vector3<f64>>, EphError> {
        self.vectors(["X", "Y", "Z"])
    }

    /// Velocity vectors from the `VX`, `VY`, `VZ` columns, in the unit of those columns.
    pub fn velocity_vectors(&self) -> Result<Vec<Vector3<f64>>, EphError> {
        self.vectors(["VX", "VY", "VZ"])
    }
}
