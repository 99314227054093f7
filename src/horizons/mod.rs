//! # Horizons protocol vocabulary
//!
//! Static knowledge about the JPL Horizons batch interface, shared by the request builder and
//! the response parser:
//!
//! - [`horizon_params`] – the closed set of request parameters, their aliases and the value
//!   transform registered for each of them,
//! - [`param_value`] – typed parameter values and the transforms themselves,
//! - [`horizon_ids`] – name ↔ code translation of major bodies,
//! - [`dimensions`] – physical dimension of the columns found in Horizons tables.
//!
//! All tables are immutable and built once.
use crate::eph_errors::EphError;

pub mod bimap;
pub mod dimensions;
pub mod horizon_ids;
pub mod horizon_params;
pub mod param_value;

use horizon_params::{canonicalize_key, HorizonsParam};
use param_value::ParamValue;

/// Canonicalize the value written under `param`.
///
/// Parameters without a registered transform keep the string form of the value.
pub fn canonicalize_value(param: HorizonsParam, value: &ParamValue) -> Result<String, EphError> {
    match param.value_filter() {
        Some(filter) => filter.apply(param.as_str(), value),
        None => Ok(value.to_string()),
    }
}

/// Canonicalize a key-value pair in one go.
pub fn canonicalize(key: &str, value: &ParamValue) -> Result<(HorizonsParam, String), EphError> {
    let param = canonicalize_key(key)?;
    let value = canonicalize_value(param, value)?;
    Ok((param, value))
}
