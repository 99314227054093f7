//! Retrieve ephemerides from the JPL Horizons batch interface and read them as typed tables.
//!
//! ```rust,no_run
//! use eph::env_state::EphEnv;
//! use eph::shortcuts::{vec, Dates};
//! use eph::jpl_request::JplRequest;
//!
//! let env = EphEnv::new();
//! let table = vec(&env, &["earth", "mars"], &Dates::from(("2020-01-01", "2020-02-01")), &JplRequest::new())
//!     .unwrap();
//! println!("{:?}", table.colnames());
//! ```
pub mod config;
pub mod constants;
pub mod env_state;
pub mod eph_errors;
pub mod horizons;
pub mod jpl_request;
pub mod jpl_response;
pub mod shortcuts;
pub mod table;
pub mod units;

pub use eph_errors::{EphError, Result};
pub use jpl_request::JplRequest;
pub use jpl_response::JplResponse;
pub use table::EphemTable;
