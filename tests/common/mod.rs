use std::cell::RefCell;
use std::fs;

use eph::constants::JPL_ENDPOINT;
use eph::env_state::HttpTransport;
use eph::{EphError, JplResponse};

pub fn read_data(name: &str) -> String {
    fs::read_to_string(format!("tests/data/{name}"))
        .unwrap_or_else(|e| panic!("cannot read tests/data/{name}: {e}"))
}

/// Answers requests with canned bodies, picked by the `COMMAND=<code>` found in the URL,
/// and remembers every URL it was asked for.
pub struct CannedTransport {
    bodies: Vec<(String, String)>,
    pub urls: RefCell<Vec<String>>,
}

impl CannedTransport {
    pub fn new() -> Self {
        CannedTransport {
            bodies: Vec::new(),
            urls: RefCell::new(Vec::new()),
        }
    }

    /// Answer requests for `code` with the content of `tests/data/<file>`.
    pub fn with(mut self, code: &str, file: &str) -> Self {
        self.bodies.push((format!("COMMAND={code}&"), read_data(file)));
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.urls.borrow().clone()
    }
}

impl HttpTransport for CannedTransport {
    fn endpoint(&self) -> &str {
        JPL_ENDPOINT
    }

    fn get(&self, url: &str) -> Result<JplResponse, EphError> {
        self.urls.borrow_mut().push(url.to_string());
        let query = format!("{url}&");
        self.bodies
            .iter()
            .find(|(needle, _)| query.contains(needle.as_str()))
            .map(|(_, body)| JplResponse::new(200, body.clone()))
            .ok_or_else(|| EphError::ConnectionFailure(format!("no canned response for {url}")))
    }
}
