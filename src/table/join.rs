//! Inner join of ephemeris tables on shared key columns.
//!
//! Used to aggregate the tables of several targets sampled at the same epochs: rows are
//! matched on the textual form of their key cells, so two tables parsed from the same
//! Horizons time grid join exactly.
use indexmap::IndexMap;
use itertools::Itertools;
use tracing::debug;

use super::{Cell, Column, EphemTable};
use crate::eph_errors::EphError;

fn key_indices(table: &EphemTable, keys: &[&str]) -> Result<Vec<usize>, EphError> {
    keys.iter()
        .map(|key| {
            table
                .columns
                .iter()
                .position(|c| c.name == *key)
                .ok_or_else(|| EphError::MissingColumn(key.to_string()))
        })
        .collect()
}

fn row_key(table: &EphemTable, key_idx: &[usize], row: usize) -> String {
    key_idx
        .iter()
        .map(|&i| table.columns[i].cells[row].to_string())
        .join("\u{1f}")
}

impl EphemTable {
    /// Inner join of `self` and `other` on the columns named by `keys`.
    ///
    /// The result holds the key columns, then the other columns of `self`, then the other
    /// columns of `other`; a non-key name present on both sides gets a `_2` suffix on the
    /// right. Metadata of `self` wins over metadata of `other`.
    ///
    /// Return
    /// ------
    /// * the joined table, or [`EphError::MissingColumn`] if a key is missing on either side.
    pub fn join(&self, other: &EphemTable, keys: &[&str]) -> Result<EphemTable, EphError> {
        let left_keys = key_indices(self, keys)?;
        let right_keys = key_indices(other, keys)?;

        let mut right_rows: IndexMap<String, Vec<usize>> = IndexMap::new();
        for row in 0..other.n_rows() {
            right_rows
                .entry(row_key(other, &right_keys, row))
                .or_default()
                .push(row);
        }

        let pairs: Vec<(usize, usize)> = (0..self.n_rows())
            .flat_map(|left| {
                right_rows
                    .get(&row_key(self, &left_keys, left))
                    .into_iter()
                    .flatten()
                    .map(move |&right| (left, right))
            })
            .collect();

        debug!(
            left_rows = self.n_rows(),
            right_rows = other.n_rows(),
            joined_rows = pairs.len(),
            "joined tables on {:?}",
            keys
        );

        let pick = |column: &Column, right: bool| -> Vec<Cell> {
            pairs
                .iter()
                .map(|&(l, r)| column.cells[if right { r } else { l }].clone())
                .collect()
        };

        let mut columns: Vec<Column> = Vec::new();
        for &i in &left_keys {
            let col = &self.columns[i];
            columns.push(Column {
                name: col.name.clone(),
                cells: pick(col, false),
                unit: col.unit,
            });
        }
        for (i, col) in self.columns.iter().enumerate() {
            if !left_keys.contains(&i) {
                columns.push(Column {
                    name: col.name.clone(),
                    cells: pick(col, false),
                    unit: col.unit,
                });
            }
        }
        for (i, col) in other.columns.iter().enumerate() {
            if right_keys.contains(&i) {
                continue;
            }
            let name = if columns.iter().any(|c| c.name == col.name) {
                format!("{}_2", col.name)
            } else {
                col.name.clone()
            };
            columns.push(Column {
                name,
                cells: pick(col, true),
                unit: col.unit,
            });
        }

        let mut meta = self.meta.clone();
        for (k, v) in &other.meta {
            meta.entry(k.clone()).or_insert_with(|| v.clone());
        }

        Ok(EphemTable { columns, meta })
    }
}

#[cfg(test)]
mod join_test {
    use super::*;
    use crate::constants::Metadata;

    fn table(names: &[&str], data: Vec<Vec<Cell>>, meta: &[(&str, &str)]) -> EphemTable {
        let meta: Metadata = meta
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EphemTable::from_columns(names.iter().map(|s| s.to_string()).collect(), data, meta)
            .unwrap()
    }

    #[test]
    fn test_join_on_epoch() {
        let earth = table(
            &["JDTDB", "earth_X"],
            vec![
                vec![Cell::Numeric(1.0), Cell::Numeric(2.0), Cell::Numeric(3.0)],
                vec![Cell::Numeric(10.0), Cell::Numeric(20.0), Cell::Numeric(30.0)],
            ],
            &[("Output units", "KM-S")],
        );
        let mars = table(
            &["JDTDB", "mars_X"],
            vec![
                vec![Cell::Numeric(2.0), Cell::Numeric(3.0), Cell::Numeric(4.0)],
                vec![Cell::Numeric(200.0), Cell::Numeric(300.0), Cell::Numeric(400.0)],
            ],
            &[("Output units", "AU-D"), ("Target body name", "mars")],
        );

        let joined = earth.join(&mars, &["JDTDB"]).unwrap();
        assert_eq!(joined.colnames(), vec!["JDTDB", "earth_X", "mars_X"]);
        assert_eq!(joined.values("JDTDB").unwrap(), vec![2.0, 3.0]);
        assert_eq!(joined.values("earth_X").unwrap(), vec![20.0, 30.0]);
        assert_eq!(joined.values("mars_X").unwrap(), vec![200.0, 300.0]);
        assert_eq!(joined.meta()["Output units"], "KM-S");
        assert_eq!(joined.meta()["Target body name"], "mars");
    }

    #[test]
    fn test_join_name_collision_and_missing_key() {
        let a = table(&["T", "X"], vec![vec!["t0".into()], vec![Cell::Numeric(1.0)]], &[]);
        let b = table(&["T", "X"], vec![vec!["t0".into()], vec![Cell::Numeric(2.0)]], &[]);
        let joined = a.join(&b, &["T"]).unwrap();
        assert_eq!(joined.colnames(), vec!["T", "X", "X_2"]);

        assert_eq!(
            a.join(&b, &["JDTDB"]),
            Err(EphError::MissingColumn("JDTDB".into()))
        );
    }
}
