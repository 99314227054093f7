//! # Request configuration files
//!
//! Request parameters can be kept in TOML files whose tables are named sections:
//!
//! ```toml
//! [default]
//! CSV_FORMAT = true
//! OBJ_DATA = "NO"
//!
//! [jupiter-moons]
//! CENTER = "jupiter"
//! step = "1h"
//! ```
//!
//! Keys may be any canonical name or alias, they are resolved when the section is applied to
//! a [`JplRequest`](crate::jpl_request::JplRequest). Scalars are stringified, arrays are joined
//! with `,`. The `[default]` section applies to every section, section keys win.
//!
//! Without an explicit file, `~/.ephrc` then `./.ephrc` are read, the latter overriding the
//! former.
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use directories::BaseDirs;
use indexmap::IndexMap;
use itertools::Itertools;
use toml::Value;
use tracing::debug;

use crate::eph_errors::EphError;

pub const CONFIG_FILE_NAME: &str = ".ephrc";

/// Section merged below every other one.
pub const DEFAULT_SECTION: &str = "default";

/// A parsed configuration: section name → parameter name → value.
pub type Config = IndexMap<String, IndexMap<String, String>>;

/// Files read when no configuration file is given, lowest priority first.
pub fn default_config_files() -> Vec<Utf8PathBuf> {
    let home = BaseDirs::new()
        .and_then(|dirs| Utf8Path::from_path(dirs.home_dir()).map(Utf8Path::to_path_buf));
    home.into_iter()
        .chain(std::iter::once(Utf8PathBuf::from(".")))
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .collect()
}

fn stringify(key: &str, value: &Value) -> Result<String, EphError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Float(x) => Ok(x.to_string()),
        Value::Boolean(b) => Ok(b.to_string()),
        Value::Datetime(dt) => Ok(dt.to_string()),
        Value::Array(items) => Ok(items
            .iter()
            .map(|item| stringify(key, item))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .join(",")),
        Value::Table(_) => Err(EphError::ConfigParse(format!(
            "'{key}' holds a table, expected a parameter value"
        ))),
    }
}

/// Parse the text of one configuration file.
pub fn parse_config(source: &str) -> Result<Config, EphError> {
    let raw: IndexMap<String, IndexMap<String, Value>> = toml::from_str(source)?;
    raw.into_iter()
        .map(|(section, entries)| -> Result<_, EphError> {
            let entries = entries
                .iter()
                .map(|(key, value)| -> Result<_, EphError> {
                    Ok((key.clone(), stringify(key, value)?))
                })
                .collect::<Result<IndexMap<_, _>, _>>()?;
            Ok((section, entries))
        })
        .collect()
}

/// Read and merge configuration files.
///
/// Arguments
/// ---------
/// * `path`: an explicit file, or `None` for [`default_config_files`]
///
/// Return
/// ------
/// * the merged configuration, or [`EphError::ConfigNotFound`] listing the searched files when
///   none of them exists.
pub fn read_config(path: Option<&Utf8Path>) -> Result<Config, EphError> {
    let candidates = match path {
        Some(path) => vec![path.to_path_buf()],
        None => default_config_files(),
    };

    let mut merged = Config::new();
    let mut found = false;
    for file in candidates.iter().filter(|file| file.is_file()) {
        debug!(%file, "reading configuration file");
        found = true;
        for (section, entries) in parse_config(&fs::read_to_string(file)?)? {
            merged.entry(section).or_default().extend(entries);
        }
    }

    if !found {
        return Err(EphError::ConfigNotFound(
            candidates.iter().map(Utf8PathBuf::to_string).collect(),
        ));
    }
    Ok(merged)
}

/// Parameters of `section`, over the `[default]` ones.
///
/// Return
/// ------
/// * [`EphError::ConfigSectionNotFound`] when `section` is absent (a missing `[default]` is
///   not an error).
pub fn section_params(config: &Config, section: &str) -> Result<IndexMap<String, String>, EphError> {
    let mut params = config.get(DEFAULT_SECTION).cloned().unwrap_or_default();
    if section != DEFAULT_SECTION {
        let entries = config
            .get(section)
            .ok_or_else(|| EphError::ConfigSectionNotFound(section.to_string()))?;
        params.extend(entries.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    Ok(params)
}

/// [`read_config`] then [`section_params`].
pub fn load_section(
    path: Option<&Utf8Path>,
    section: &str,
) -> Result<IndexMap<String, String>, EphError> {
    section_params(&read_config(path)?, section)
}
