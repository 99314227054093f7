//! Physical units attached to the columns of an [`EphemTable`](crate::table::EphemTable).
//!
//! Horizons tables only ever need a handful of units: a distance (`km`, `AU`, `m`), a time
//! (`s`, `min`, `h`, `d`), the degree, and quotients of those (`km / s`, `deg / d`).
//! A [`Unit`] is therefore a base unit optionally divided by another one.
use std::fmt;
use std::ops::Div;
use std::str::FromStr;

use crate::constants::{AU, SECONDS_PER_DAY};
use crate::eph_errors::EphError;

/// Kind of quantity measured by a [`BaseUnit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Length,
    Time,
    Angle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseUnit {
    Meter,
    Kilometer,
    AstronomicalUnit,
    Second,
    Minute,
    Hour,
    Day,
    Degree,
}

impl BaseUnit {
    pub fn kind(&self) -> UnitKind {
        match self {
            BaseUnit::Meter | BaseUnit::Kilometer | BaseUnit::AstronomicalUnit => UnitKind::Length,
            BaseUnit::Second | BaseUnit::Minute | BaseUnit::Hour | BaseUnit::Day => UnitKind::Time,
            BaseUnit::Degree => UnitKind::Angle,
        }
    }

    /// Value of one unit in the SI unit of its kind (meter, second, radian).
    pub fn si_factor(&self) -> f64 {
        match self {
            BaseUnit::Meter => 1.0,
            BaseUnit::Kilometer => 1_000.0,
            BaseUnit::AstronomicalUnit => AU * 1_000.0,
            BaseUnit::Second => 1.0,
            BaseUnit::Minute => 60.0,
            BaseUnit::Hour => 3_600.0,
            BaseUnit::Day => SECONDS_PER_DAY,
            BaseUnit::Degree => std::f64::consts::PI / 180.0,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BaseUnit::Meter => "m",
            BaseUnit::Kilometer => "km",
            BaseUnit::AstronomicalUnit => "AU",
            BaseUnit::Second => "s",
            BaseUnit::Minute => "min",
            BaseUnit::Hour => "h",
            BaseUnit::Day => "d",
            BaseUnit::Degree => "deg",
        }
    }
}

impl fmt::Display for BaseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for BaseUnit {
    type Err = EphError;

    /// Parse a unit token as written by Horizons in `Output units` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" => Ok(BaseUnit::Meter),
            "km" => Ok(BaseUnit::Kilometer),
            "au" => Ok(BaseUnit::AstronomicalUnit),
            "s" | "sec" => Ok(BaseUnit::Second),
            "min" => Ok(BaseUnit::Minute),
            "h" | "hr" => Ok(BaseUnit::Hour),
            "d" | "day" => Ok(BaseUnit::Day),
            "deg" => Ok(BaseUnit::Degree),
            other => Err(EphError::ParseError(format!("unrecognized unit '{other}'"))),
        }
    }
}

/// A base unit, possibly divided by another base unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Unit {
    pub numerator: BaseUnit,
    pub denominator: Option<BaseUnit>,
}

impl Unit {
    pub fn si_factor(&self) -> f64 {
        let den = self.denominator.map_or(1.0, |d| d.si_factor());
        self.numerator.si_factor() / den
    }

    /// Whether values in `self` and `other` measure the same kind of quantity.
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.numerator.kind() == other.numerator.kind()
            && self.denominator.map(|d| d.kind()) == other.denominator.map(|d| d.kind())
    }

    /// Factor converting a value expressed in `self` into `target`.
    ///
    /// Return
    /// ------
    /// * `None` when the two units measure different kinds of quantity.
    pub fn conversion_factor(&self, target: &Unit) -> Option<f64> {
        self.is_compatible(target)
            .then(|| self.si_factor() / target.si_factor())
    }
}

impl From<BaseUnit> for Unit {
    fn from(base: BaseUnit) -> Self {
        Unit {
            numerator: base,
            denominator: None,
        }
    }
}

impl Div for BaseUnit {
    type Output = Unit;

    fn div(self, rhs: BaseUnit) -> Unit {
        Unit {
            numerator: self,
            denominator: Some(rhs),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.denominator {
            Some(den) => write!(f, "{} / {}", self.numerator, den),
            None => write!(f, "{}", self.numerator),
        }
    }
}

#[cfg(test)]
mod units_test {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_parse_base_unit() {
        assert_eq!("KM".parse::<BaseUnit>(), Ok(BaseUnit::Kilometer));
        assert_eq!("au".parse::<BaseUnit>(), Ok(BaseUnit::AstronomicalUnit));
        assert_eq!("D".parse::<BaseUnit>(), Ok(BaseUnit::Day));
        assert!("parsec".parse::<BaseUnit>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!((BaseUnit::Kilometer / BaseUnit::Second).to_string(), "km / s");
        assert_eq!(Unit::from(BaseUnit::Degree).to_string(), "deg");
    }

    #[test]
    fn test_conversion_factor() {
        let au_per_day = BaseUnit::AstronomicalUnit / BaseUnit::Day;
        let km_per_s = BaseUnit::Kilometer / BaseUnit::Second;
        assert_relative_eq!(
            au_per_day.conversion_factor(&km_per_s).unwrap(),
            AU / SECONDS_PER_DAY,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            Unit::from(BaseUnit::Kilometer)
                .conversion_factor(&BaseUnit::AstronomicalUnit.into())
                .unwrap(),
            1.0 / AU
        );
        assert_eq!(
            Unit::from(BaseUnit::Kilometer).conversion_factor(&BaseUnit::Second.into()),
            None
        );
        assert_eq!(km_per_s.conversion_factor(&BaseUnit::Kilometer.into()), None);
    }
}
