//! In-memory fetcher for unit tests: canned responses plus a request log.

use super::{FetchError, Fetcher};
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Default)]
pub(crate) struct MemoryFetcher {
    responses: HashMap<String, Result<String, u32>>,
    requests: RefCell<Vec<String>>,
}

impl MemoryFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Serve `body` with 200 for `url`.
    pub(crate) fn with(mut self, url: &str, body: &str) -> Self {
        self.responses.insert(url.to_string(), Ok(body.to_string()));
        self
    }

    /// Answer `url` with the given HTTP status.
    pub(crate) fn with_status(mut self, url: &str, status: u32) -> Self {
        self.responses.insert(url.to_string(), Err(status));
        self
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub(crate) fn clear_requests(&self) {
        self.requests.borrow_mut().clear();
    }
}

impl Fetcher for MemoryFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.requests.borrow_mut().push(url.to_string());
        match self.responses.get(url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(FetchError::Http { status: *status }),
            None => Err(FetchError::Http { status: 404 }),
        }
    }
}
