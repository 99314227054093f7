//! Typed request-parameter values and the value transforms Horizons needs.
//!
//! Callers may hand a request text, switches, numbers, calendar epochs or lists. Before a value
//! reaches the query string it is reduced to the string form Horizons expects by one of the
//! transforms of this module, selected per parameter by
//! [`HorizonsParam::value_filter`](crate::horizons::horizon_params::HorizonsParam::value_filter).
use std::fmt;
use std::sync::LazyLock;

use hifitime::Epoch;
use itertools::Itertools;
use regex::Regex;

use crate::constants::{NO, YES};
use crate::eph_errors::EphError;

/// A request-parameter value before canonicalization.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Calendar time, formatted as `YYYY-MM-DD HH:MM` (UTC) for time parameters
    Epoch(Epoch),
    /// Multi-valued field (e.g. `TLIST`), joined with `,`
    List(Vec<String>),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(s) => write!(f, "{s}"),
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Int(i) => write!(f, "{i}"),
            ParamValue::Float(x) => write!(f, "{x}"),
            ParamValue::Epoch(epoch) => write!(f, "{}", format_epoch(epoch)),
            ParamValue::List(items) => write!(f, "{}", items.iter().join(",")),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<&String> for ParamValue {
    fn from(s: &String) -> Self {
        ParamValue::Text(s.clone())
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

impl From<i64> for ParamValue {
    fn from(i: i64) -> Self {
        ParamValue::Int(i)
    }
}

impl From<i32> for ParamValue {
    fn from(i: i32) -> Self {
        ParamValue::Int(i.into())
    }
}

impl From<u32> for ParamValue {
    fn from(i: u32) -> Self {
        ParamValue::Int(i.into())
    }
}

impl From<f64> for ParamValue {
    fn from(x: f64) -> Self {
        ParamValue::Float(x)
    }
}

impl From<Epoch> for ParamValue {
    fn from(epoch: Epoch) -> Self {
        ParamValue::Epoch(epoch)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(items: Vec<String>) -> Self {
        ParamValue::List(items)
    }
}

impl From<Vec<f64>> for ParamValue {
    fn from(items: Vec<f64>) -> Self {
        ParamValue::List(items.iter().map(f64::to_string).collect())
    }
}

/// Format an epoch as `YYYY-MM-DD HH:MM` in UTC.
pub fn format_epoch(epoch: &Epoch) -> String {
    let (y, m, d, hh, mm, _, _) = epoch.to_gregorian_utc();
    format!("{y:04}-{m:02}-{d:02} {hh:02}:{mm:02}")
}

/// Interpret a switch-like value as `YES` / `NO`.
///
/// Truthy inputs are `y`, `yes`, `true`, `1` (any case, surrounding quotes ignored),
/// `true` and the number one; falsy inputs are their counterparts. Anything else is
/// `None`, there is no default.
pub fn yes_or_no(value: &ParamValue) -> Option<&'static str> {
    match value {
        ParamValue::Bool(true) | ParamValue::Int(1) => Some(YES),
        ParamValue::Bool(false) | ParamValue::Int(0) => Some(NO),
        ParamValue::Float(x) if *x == 1.0 => Some(YES),
        ParamValue::Float(x) if *x == 0.0 => Some(NO),
        ParamValue::Text(s) => {
            let cleaned = s
                .trim()
                .trim_matches(|c| c == '\'' || c == '"')
                .to_lowercase();
            match cleaned.as_str() {
                "y" | "yes" | "true" | "1" => Some(YES),
                "n" | "no" | "false" | "0" => Some(NO),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Wrap a value in single quotes unless it is already fully quoted.
///
/// Double quotes are normalized to single quotes: `"abc"` → `'abc'`.
pub fn wrap(value: &str) -> String {
    let fully_quoted = |q: char| value.len() >= 2 && value.starts_with(q) && value.ends_with(q);
    let inner = if fully_quoted('\'') || fully_quoted('"') {
        &value[1..value.len() - 1]
    } else {
        value
    };
    format!("'{inner}'")
}

static PROTOCOL_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}-\d{1,2}-\d{1,2})[ T](\d{1,2}:\d{2})(:\d{2}(\.\d*)?)?$")
        .expect("protocol time regex is valid")
});

/// Reduce a time value to the `YYYY-MM-DD HH:MM` form understood by Horizons.
///
/// * epochs are formatted at minute precision,
/// * text already shaped like a Horizons date-time keeps only its minute precision
///   (`2017-04-22T10:15:32.5` → `2017-04-22 10:15`),
/// * anything else (plain dates, `JD2451545.0`, ...) is passed through unchanged.
pub fn format_time(value: &ParamValue) -> String {
    match value {
        ParamValue::Epoch(epoch) => format_epoch(epoch),
        ParamValue::Text(s) => match PROTOCOL_TIME.captures(s.trim()) {
            Some(caps) => format!("{} {}", &caps[1], &caps[2]),
            None => s.clone(),
        },
        other => other.to_string(),
    }
}

/// Value transforms registered for some Horizons parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFilter {
    /// Body name → target code
    ObjectCode,
    /// Body name → site code
    SiteCode,
    /// Multi-value field, quoted as a whole
    Wrap,
    /// Switch → `YES` / `NO`
    YesNo,
    /// Calendar time → `YYYY-MM-DD HH:MM`
    Time,
}

impl ValueFilter {
    /// Apply the transform to `value`; `param` only labels the error.
    ///
    /// Return
    /// ------
    /// * the canonical string, or [`EphError::UninterpretableValue`] when a switch is neither
    ///   truthy nor falsy.
    pub fn apply(&self, param: &str, value: &ParamValue) -> Result<String, EphError> {
        match self {
            ValueFilter::ObjectCode => Ok(super::horizon_ids::codify_obj(&value.to_string())),
            ValueFilter::SiteCode => Ok(super::horizon_ids::codify_site(&value.to_string())),
            ValueFilter::Wrap => Ok(wrap(&value.to_string())),
            ValueFilter::YesNo => yes_or_no(value).map(str::to_string).ok_or_else(|| {
                EphError::UninterpretableValue {
                    param: param.to_string(),
                    value: value.to_string(),
                }
            }),
            ValueFilter::Time => Ok(format_time(value)),
        }
    }
}
