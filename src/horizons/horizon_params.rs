//! Closed vocabulary of Horizons batch parameters and key canonicalization.
//!
//! A key given by a caller (`"target"`, `"table-type"`, `"START_TIME"`, ...) is mapped to a
//! [`HorizonsParam`] by [`lookup_key`]: uppercase, `-` → `_`, then either a canonical name
//! or one of the registered aliases. [`canonicalize_key`] is the failing variant used when
//! building a request.
use std::fmt;
use std::str::FromStr;

use super::param_value::ValueFilter;
use crate::eph_errors::EphError;

/// A parameter understood by the Horizons batch interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HorizonsParam {
    // target
    Command,
    // time
    StartTime,
    StopTime,
    StepSize,
    Tlist,
    TimeZone,
    // reference
    RefPlane,
    RefSystem,
    Center,
    CoordType,
    SiteCoord,
    // switches
    MakeEphem,
    // output
    TableType,
    Quantities,
    VecTable,
    VecCorr,
    Apparent,
    TimeDigits,
    OutUnits,
    RangeUnits,
    SuppressRangeRate,
    ElevCut,
    SkipDaylt,
    SolarElong,
    Airmass,
    LhaCutoff,
    ExtraPrec,
    VecDeltaT,
    TpType,
    RTSOnly,
    CaTableType,
    Tca3sgLimit,
    CalimSb,
    CalimPl,
    // format
    CsvFormat,
    CalFormat,
    AngFormat,
    VecLabels,
    ElmLabels,
    ObjData,
}

impl HorizonsParam {
    pub const ALL: [HorizonsParam; 40] = [
        HorizonsParam::Command,
        HorizonsParam::StartTime,
        HorizonsParam::StopTime,
        HorizonsParam::StepSize,
        HorizonsParam::Tlist,
        HorizonsParam::TimeZone,
        HorizonsParam::RefPlane,
        HorizonsParam::RefSystem,
        HorizonsParam::Center,
        HorizonsParam::CoordType,
        HorizonsParam::SiteCoord,
        HorizonsParam::MakeEphem,
        HorizonsParam::TableType,
        HorizonsParam::Quantities,
        HorizonsParam::VecTable,
        HorizonsParam::VecCorr,
        HorizonsParam::Apparent,
        HorizonsParam::TimeDigits,
        HorizonsParam::OutUnits,
        HorizonsParam::RangeUnits,
        HorizonsParam::SuppressRangeRate,
        HorizonsParam::ElevCut,
        HorizonsParam::SkipDaylt,
        HorizonsParam::SolarElong,
        HorizonsParam::Airmass,
        HorizonsParam::LhaCutoff,
        HorizonsParam::ExtraPrec,
        HorizonsParam::VecDeltaT,
        HorizonsParam::TpType,
        HorizonsParam::RTSOnly,
        HorizonsParam::CaTableType,
        HorizonsParam::Tca3sgLimit,
        HorizonsParam::CalimSb,
        HorizonsParam::CalimPl,
        HorizonsParam::CsvFormat,
        HorizonsParam::CalFormat,
        HorizonsParam::AngFormat,
        HorizonsParam::VecLabels,
        HorizonsParam::ElmLabels,
        HorizonsParam::ObjData,
    ];

    /// Parameters a request cannot be sent without.
    pub const REQUIRED: [HorizonsParam; 3] = [
        HorizonsParam::Command,
        HorizonsParam::StartTime,
        HorizonsParam::StopTime,
    ];

    /// Protocol spelling of the parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            HorizonsParam::Command => "COMMAND",
            HorizonsParam::StartTime => "START_TIME",
            HorizonsParam::StopTime => "STOP_TIME",
            HorizonsParam::StepSize => "STEP_SIZE",
            HorizonsParam::Tlist => "TLIST",
            HorizonsParam::TimeZone => "TIME_ZONE",
            HorizonsParam::RefPlane => "REF_PLANE",
            HorizonsParam::RefSystem => "REF_SYSTEM",
            HorizonsParam::Center => "CENTER",
            HorizonsParam::CoordType => "COORD_TYPE",
            HorizonsParam::SiteCoord => "SITE_COORD",
            HorizonsParam::MakeEphem => "MAKE_EPHEM",
            HorizonsParam::TableType => "TABLE_TYPE",
            HorizonsParam::Quantities => "QUANTITIES",
            HorizonsParam::VecTable => "VEC_TABLE",
            HorizonsParam::VecCorr => "VEC_CORR",
            HorizonsParam::Apparent => "APPARENT",
            HorizonsParam::TimeDigits => "TIME_DIGITS",
            HorizonsParam::OutUnits => "OUT_UNITS",
            HorizonsParam::RangeUnits => "RANGE_UNITS",
            HorizonsParam::SuppressRangeRate => "SUPPRESS_RANGE_RATE",
            HorizonsParam::ElevCut => "ELEV_CUT",
            HorizonsParam::SkipDaylt => "SKIP_DAYLT",
            HorizonsParam::SolarElong => "SOLAR_ELONG",
            HorizonsParam::Airmass => "AIRMASS",
            HorizonsParam::LhaCutoff => "LHA_CUTOFF",
            HorizonsParam::ExtraPrec => "EXTRA_PREC",
            HorizonsParam::VecDeltaT => "VEC_DELTA_T",
            HorizonsParam::TpType => "TP_TYPE",
            HorizonsParam::RTSOnly => "R_T_S_ONLY",
            HorizonsParam::CaTableType => "CA_TABLE_TYPE",
            HorizonsParam::Tca3sgLimit => "TCA3SG_LIMIT",
            HorizonsParam::CalimSb => "CALIM_SB",
            HorizonsParam::CalimPl => "CALIM_PL",
            HorizonsParam::CsvFormat => "CSV_FORMAT",
            HorizonsParam::CalFormat => "CAL_FORMAT",
            HorizonsParam::AngFormat => "ANG_FORMAT",
            HorizonsParam::VecLabels => "VEC_LABELS",
            HorizonsParam::ElmLabels => "ELM_LABELS",
            HorizonsParam::ObjData => "OBJ_DATA",
        }
    }

    /// Human-friendly spellings accepted in place of the canonical name.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            HorizonsParam::Command => &["OBJECT", "OBJ", "BODY", "TARGET"],
            HorizonsParam::StartTime => &["START", "BEGIN", "FROM"],
            HorizonsParam::StopTime => &["STOP", "END", "TO"],
            HorizonsParam::StepSize => &["STEP", "STEPS"],
            HorizonsParam::Center => &["ORIGIN"],
            HorizonsParam::CsvFormat => &["CSV"],
            HorizonsParam::TableType => &["TYPE"],
            HorizonsParam::VecTable => &["TABLE"],
            _ => &[],
        }
    }

    /// Value transform applied when the parameter is written into a request.
    pub fn value_filter(&self) -> Option<ValueFilter> {
        match self {
            HorizonsParam::Command => Some(ValueFilter::ObjectCode),
            HorizonsParam::Center => Some(ValueFilter::SiteCode),
            HorizonsParam::Tlist => Some(ValueFilter::Wrap),
            HorizonsParam::CsvFormat
            | HorizonsParam::MakeEphem
            | HorizonsParam::ObjData
            | HorizonsParam::VecLabels => Some(ValueFilter::YesNo),
            HorizonsParam::StartTime | HorizonsParam::StopTime => Some(ValueFilter::Time),
            _ => None,
        }
    }
}

impl fmt::Display for HorizonsParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HorizonsParam {
    type Err = EphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        canonicalize_key(s)
    }
}

/// Resolve a key to its canonical parameter, `None` when it names no Horizons parameter.
///
/// Examples
/// --------
/// ```rust
/// use eph::horizons::horizon_params::{lookup_key, HorizonsParam};
/// assert_eq!(lookup_key("table-type"), Some(HorizonsParam::TableType));
/// assert_eq!(lookup_key("target"), Some(HorizonsParam::Command));
/// assert_eq!(lookup_key("key"), None);
/// ```
pub fn lookup_key(key: &str) -> Option<HorizonsParam> {
    let normalized = key.trim().to_uppercase().replace('-', "_");
    HorizonsParam::ALL
        .into_iter()
        .find(|param| param.as_str() == normalized)
        .or_else(|| {
            HorizonsParam::ALL
                .into_iter()
                .find(|param| param.aliases().contains(&normalized.as_str()))
        })
}

/// Resolve a key to its canonical parameter.
///
/// Return
/// ------
/// * the [`HorizonsParam`], or [`EphError::UnknownParameter`] carrying the normalized key.
pub fn canonicalize_key(key: &str) -> Result<HorizonsParam, EphError> {
    lookup_key(key)
        .ok_or_else(|| EphError::UnknownParameter(key.trim().to_uppercase().replace('-', "_")))
}

/// Whether `key` is a Horizons parameter or one of its aliases.
pub fn is_horizons_param(key: &str) -> bool {
    lookup_key(key).is_some()
}
