//! Name ↔ code translation for the major bodies known to Horizons.
//!
//! Horizons addresses targets (`COMMAND`) by a numeric ID and coordinate origins (`CENTER`)
//! by a site code of the form `@<id>`. This module provides the typed table of the major
//! bodies and the three translation helpers built on it:
//!
//! * [`codify_obj`] – human name → target code (`"earth"` → `"399"`)
//! * [`codify_site`] – human name → site code (`"earth"` → `"@399"`)
//! * [`humanify`] – code → human name (`"@499"` → `"mars"`)
//!
//! Unknown names are never an error: they are forwarded to Horizons, which understands many
//! more designations than this table.
use std::sync::LazyLock;

use super::bimap::BiMap;

/// Major bodies with a well-known Horizons ID.
///
/// Conversions
/// -----------
/// * Use [`TryFrom<u32>`] to convert a raw Horizons ID into a `HorizonID`.
/// * Use [`From<HorizonID>`] to recover the integer ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizonID {
    Sun = 10,
    Mercury = 199,
    Venus = 299,
    Earth = 399,
    Mars = 499,
    Jupiter = 599,
    Saturn = 699,
    Uranus = 799,
    Neptune = 899,
}

impl HorizonID {
    pub const ALL: [HorizonID; 9] = [
        HorizonID::Sun,
        HorizonID::Mercury,
        HorizonID::Venus,
        HorizonID::Earth,
        HorizonID::Mars,
        HorizonID::Jupiter,
        HorizonID::Saturn,
        HorizonID::Uranus,
        HorizonID::Neptune,
    ];

    /// Lowercase human-readable name of the body.
    pub fn name(&self) -> &'static str {
        match self {
            HorizonID::Sun => "sun",
            HorizonID::Mercury => "mercury",
            HorizonID::Venus => "venus",
            HorizonID::Earth => "earth",
            HorizonID::Mars => "mars",
            HorizonID::Jupiter => "jupiter",
            HorizonID::Saturn => "saturn",
            HorizonID::Uranus => "uranus",
            HorizonID::Neptune => "neptune",
        }
    }
}

impl TryFrom<u32> for HorizonID {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        HorizonID::ALL
            .into_iter()
            .find(|id| u32::from(*id) == value)
            .ok_or_else(|| format!("Invalid Horizon ID: {value}"))
    }
}

impl From<HorizonID> for u32 {
    fn from(id: HorizonID) -> Self {
        id as u32
    }
}

/// Site keywords Horizons understands as-is in `CENTER`.
const RESERVED_SITES: [&str; 2] = ["coord", "geo"];

/// Immutable name ↔ code table, built once and shared by reference.
#[derive(Debug, Clone)]
pub struct BodyCodes {
    codes: BiMap<&'static str, u32>,
}

static STANDARD_BODY_CODES: LazyLock<BodyCodes> = LazyLock::new(|| BodyCodes {
    codes: HorizonID::ALL
        .into_iter()
        .map(|id| (id.name(), u32::from(id)))
        .collect(),
});

impl BodyCodes {
    /// The table of [`HorizonID`] bodies.
    pub fn standard() -> &'static BodyCodes {
        &STANDARD_BODY_CODES
    }

    pub fn code_of(&self, name: &str) -> Option<u32> {
        self.codes.get_by_key(name).copied()
    }

    pub fn name_of(&self, code: u32) -> Option<&'static str> {
        self.codes.get_by_value(&code).copied()
    }

    /// Translate a body name into a target code, see [`codify_obj`].
    pub fn codify_obj(&self, name: &str) -> String {
        let cleaned = strip_quotes(name);
        match self.code_of(&cleaned.to_lowercase()) {
            Some(code) => code.to_string(),
            None => cleaned.to_string(),
        }
    }

    /// Translate a body name into a site code, see [`codify_site`].
    pub fn codify_site(&self, name: &str) -> String {
        let cleaned = strip_quotes(name);
        if let Some(code) = self.code_of(&cleaned.to_lowercase()) {
            format!("@{code}")
        } else if cleaned.contains('@') || RESERVED_SITES.contains(&cleaned) {
            cleaned.to_string()
        } else {
            format!("@{cleaned}")
        }
    }

    /// Translate a target or site code back into a name, see [`humanify`].
    pub fn humanify(&self, code: &str) -> String {
        let digits = code.strip_prefix('@').unwrap_or(code);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return code.to_string();
        }
        digits
            .parse::<u32>()
            .ok()
            .and_then(|id| self.name_of(id))
            .map_or_else(|| code.to_string(), str::to_string)
    }
}

fn strip_quotes(value: &str) -> &str {
    value.trim_matches(|c| c == '\'' || c == '"')
}

/// Translate a human-readable body name into its Horizons target code.
///
/// Surrounding quotes are stripped and the lookup is case-insensitive. Names missing from
/// the table are returned cleaned but otherwise untouched.
///
/// Examples
/// --------
/// ```rust
/// use eph::horizons::horizon_ids::codify_obj;
/// assert_eq!(codify_obj("'Earth'"), "399");
/// assert_eq!(codify_obj("pluto"), "pluto");
/// ```
pub fn codify_obj(name: &str) -> String {
    BodyCodes::standard().codify_obj(name)
}

/// Translate a human-readable body name into a Horizons site code (`@<id>`).
///
/// Unknown names get a leading `@` unless they already contain one or are one of the reserved
/// keywords `coord` / `geo`.
pub fn codify_site(name: &str) -> String {
    BodyCodes::standard().codify_site(name)
}

/// Interpret a bare (`399`) or site (`@399`) numeric code as a body name.
///
/// Any other shape, or an ID missing from the table, is returned unchanged.
pub fn humanify(code: &str) -> String {
    BodyCodes::standard().humanify(code)
}
