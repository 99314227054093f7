//! # Horizons requests
//!
//! [`JplRequest`] accumulates canonical Horizons parameters and turns them into a batch URL.
//! Every key goes through [`canonicalize_key`] and every value through the transform registered
//! for its parameter, so a request only ever holds protocol-ready pairs:
//!
//! ```rust
//! use eph::jpl_request::JplRequest;
//!
//! let mut req = JplRequest::new();
//! req.set([("target", "earth"), ("start", "2020-01-01"), ("stop", "2020-01-02")])
//!     .unwrap();
//! assert!(req.is_valid());
//! assert!(req.url().unwrap().contains("COMMAND=399"));
//! ```
//!
//! Sending goes through an [`HttpTransport`], by default the
//! [`EphEnv`](crate::env_state::EphEnv) agent.
use std::fmt;

use camino::Utf8Path;
use indexmap::IndexMap;
use tracing::debug;

use crate::config;
use crate::constants::JPL_ENDPOINT;
use crate::env_state::HttpTransport;
use crate::eph_errors::EphError;
use crate::horizons::canonicalize_value;
use crate::horizons::horizon_params::{canonicalize_key, HorizonsParam};
use crate::horizons::param_value::ParamValue;
use crate::jpl_response::JplResponse;

pub mod query_url;

use query_url::add_params_to_url;

/// Canonical Horizons parameters, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JplRequest {
    params: IndexMap<HorizonsParam, String>,
}

impl JplRequest {
    pub fn new() -> Self {
        JplRequest::default()
    }

    /// Canonicalize and store every pair of `params`.
    ///
    /// Arguments
    /// ---------
    /// * `params`: parameter names (canonical or alias) with their values
    ///
    /// Return
    /// ------
    /// * the request, or the first [`EphError::UnknownParameter`] /
    ///   [`EphError::UninterpretableValue`] met. Pairs before the failing one stay stored.
    pub fn set<I, K, V>(&mut self, params: I) -> Result<&mut Self, EphError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<ParamValue>,
    {
        for (key, value) in params {
            self.insert(key.as_ref(), value)?;
        }
        Ok(self)
    }

    /// Canonicalize and store a single pair, replacing any previous value.
    pub fn insert(&mut self, key: &str, value: impl Into<ParamValue>) -> Result<&mut Self, EphError> {
        let param = canonicalize_key(key)?;
        let value = canonicalize_value(param, &value.into())?;
        self.params.insert(param, value);
        Ok(self)
    }

    /// Value stored under `key` (canonical name or alias).
    pub fn get(&self, key: &str) -> Result<Option<&str>, EphError> {
        let param = canonicalize_key(key)?;
        Ok(self.params.get(&param).map(String::as_str))
    }

    pub fn remove(&mut self, key: &str) -> Result<Option<String>, EphError> {
        let param = canonicalize_key(key)?;
        Ok(self.params.shift_remove(&param))
    }

    pub fn iter(&self) -> impl Iterator<Item = (HorizonsParam, &str)> {
        self.params.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Whether the target and the time span are all set to non-empty values.
    pub fn is_valid(&self) -> bool {
        HorizonsParam::REQUIRED.iter().all(|param| self.is_set(param))
    }

    fn is_set(&self, param: &HorizonsParam) -> bool {
        self.params.get(param).is_some_and(|v| !v.trim().is_empty())
    }

    fn missing(&self) -> Vec<&'static str> {
        HorizonsParam::REQUIRED
            .iter()
            .filter(|param| !self.is_set(param))
            .map(HorizonsParam::as_str)
            .collect()
    }

    /// The request appended to `base`, see [`add_params_to_url`].
    pub fn build_url(&self, base: &str) -> Result<String, EphError> {
        let url = add_params_to_url(base, self.params.iter().map(|(k, v)| (k.as_str(), v)))?;
        debug!(%url, "request URL built");
        Ok(url)
    }

    /// The request appended to the Horizons batch endpoint.
    pub fn url(&self) -> Result<String, EphError> {
        self.build_url(JPL_ENDPOINT)
    }

    /// Send the request through `transport`.
    ///
    /// Return
    /// ------
    /// * the raw response, [`EphError::BadRequest`] if a required parameter is missing (nothing
    ///   is sent) or [`EphError::ConnectionFailure`] from the transport.
    pub fn execute<T: HttpTransport + ?Sized>(&self, transport: &T) -> Result<JplResponse, EphError> {
        if !self.is_valid() {
            return Err(EphError::bad_request(format!(
                "missing required parameters: {}",
                self.missing().join(", ")
            )));
        }
        let url = self.build_url(transport.endpoint())?;
        let response = transport.get(&url)?;
        debug!(status = response.status, bytes = response.body.len(), "response received");
        Ok(response)
    }

    /// Load `section` of a configuration file and [`set`](JplRequest::set) its parameters.
    ///
    /// With no `path`, the default search path is used (see [`config`]).
    pub fn read_config(
        &mut self,
        path: Option<&Utf8Path>,
        section: &str,
    ) -> Result<&mut Self, EphError> {
        let params = config::load_section(path, section)?;
        self.set(params)
    }
}

impl fmt::Display for JplRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (param, value) in &self.params {
            writeln!(f, "{param}={value}")?;
        }
        Ok(())
    }
}
