//! # eph environment state
//!
//! This module defines [`EphEnv`], the **shared environment object** through which requests
//! reach the Horizons service. It holds:
//!
//! - a persistent [`ureq::Agent`] configured with a global timeout,
//! - the batch endpoint requests are appended to.
//!
//! ## Structure
//!
//! ```text
//! EphEnv
//! ├── http_client (ureq::Agent)
//! ├── endpoint    (String)
//! └── timeout     (Duration)
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use eph::env_state::EphEnv;
//! use eph::jpl_request::JplRequest;
//!
//! let env = EphEnv::new();
//! let mut req = JplRequest::new();
//! req.set([("COMMAND", "mars"), ("START_TIME", "2020-01-01"), ("STOP_TIME", "2020-01-02")])
//!     .unwrap();
//! let table = req.execute(&env).unwrap().parse().unwrap();
//! println!("{} rows", table.n_rows());
//! ```
//!
//! ## Notes
//!
//! - [`HttpTransport`] is the seam between requests and the network: anything able to answer
//!   a GET with a [`JplResponse`] can stand in for [`EphEnv`].
//! - The agent is cheap to clone and reuses its connections.
use std::time::Duration;

use tracing::debug;
use ureq::Agent;

use crate::constants::{DEFAULT_TIMEOUT_SECS, JPL_ENDPOINT};
use crate::eph_errors::EphError;
use crate::jpl_response::JplResponse;

/// Something able to send a Horizons GET request.
pub trait HttpTransport {
    /// Base URL requests are appended to.
    fn endpoint(&self) -> &str;

    /// Fetch `url` and buffer the whole response.
    ///
    /// Return
    /// ------
    /// * the response when the service answered with status 200,
    /// * [`EphError::ConnectionFailure`] on network errors, timeouts and any other status.
    fn get(&self, url: &str) -> Result<JplResponse, EphError>;
}

/// This object is passed to the functions sending requests to Horizons.
///
/// # Fields
///
/// * `http_client` - the agent used to send the requests
/// * `endpoint` - the batch endpoint, [`JPL_ENDPOINT`] by default
/// * `timeout` - the time allowed for a whole request, connection and body included
#[derive(Debug, Clone)]
pub struct EphEnv {
    pub http_client: Agent,
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for EphEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl EphEnv {
    /// Create a new environment targeting the public Horizons endpoint
    /// with the default timeout.
    pub fn new() -> Self {
        EphEnv::with_settings(JPL_ENDPOINT, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create an environment for another endpoint or timeout.
    ///
    /// Arguments
    /// ---------
    /// * `endpoint`: base URL of the batch interface
    /// * `timeout`: time allowed for a whole request
    pub fn with_settings(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();
        let agent: Agent = config.into();

        EphEnv {
            http_client: agent,
            endpoint: endpoint.into(),
            timeout,
        }
    }
}

impl HttpTransport for EphEnv {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn get(&self, url: &str) -> Result<JplResponse, EphError> {
        debug!(url, timeout = ?self.timeout, "sending Horizons request");
        let mut response = self.http_client.get(url).call()?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(EphError::ConnectionFailure(format!(
                "Horizons answered with status {status}"
            )));
        }
        let body = response.body_mut().read_to_string()?;
        Ok(JplResponse::new(status, body))
    }
}

#[cfg(test)]
mod env_state_test {
    use super::*;

    #[test]
    fn test_default_settings() {
        let env = EphEnv::default();
        assert_eq!(env.endpoint(), JPL_ENDPOINT);
        assert_eq!(env.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_connection_refused() {
        // nothing listens on the discard port of the loopback interface
        let env = EphEnv::with_settings("http://127.0.0.1:9", Duration::from_secs(2));
        let err = env.get("http://127.0.0.1:9/horizons_batch.cgi").unwrap_err();
        assert!(matches!(err, EphError::ConnectionFailure(_)));
    }

    #[test]
    #[ignore = "needs network access to ssd.jpl.nasa.gov"]
    fn test_live_request() {
        let env = EphEnv::new();
        let url = format!(
            "{}&COMMAND=399&START_TIME=2020-01-01&STOP_TIME=2020-01-02&CSV_FORMAT=YES",
            env.endpoint()
        );
        let response = env.get(&url).unwrap();
        assert_eq!(response.status, 200);
        assert!(response.raw().contains("$$SOE"));
    }
}
