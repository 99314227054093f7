//! # Constants and type definitions for eph
//!
//! This module centralizes the **protocol constants** of the JPL Horizons batch interface,
//! the **unit conversion factors** used when re-expressing table columns, and a few
//! **type aliases** shared across the crate.
//!
//! ## Overview
//!
//! - Horizons endpoint and sentinel markers delimiting the machine-readable block
//! - Unit conversions (AU ↔ km, days ↔ seconds)
//! - Core type aliases used across the crate

use indexmap::IndexMap;

// -------------------------------------------------------------------------------------------------
// Horizons batch protocol
// -------------------------------------------------------------------------------------------------

/// Batch endpoint of the JPL Horizons service. Request parameters are appended to its query string.
pub const JPL_ENDPOINT: &str = "https://ssd.jpl.nasa.gov/horizons_batch.cgi?batch=1";

/// Start-of-ephemeris marker
pub const SOE_MARKER: &str = "$$SOE";

/// End-of-ephemeris marker
pub const EOE_MARKER: &str = "$$EOE";

/// Marks the start of the echoed request parameters in a Horizons response
pub const SOF_MARKER: &str = "!$$SOF";

/// Token used by Horizons for an enabled switch
pub const YES: &str = "YES";

/// Token used by Horizons for a disabled switch
pub const NO: &str = "NO";

/// Default timeout applied to a Horizons request, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Free-form metadata recovered from a Horizons header (label → value), insertion ordered
pub type Metadata = IndexMap<String, String>;

/// Request parameters echoed back by Horizons after the `!$$SOF` marker
pub type EchoedParams = IndexMap<String, String>;
