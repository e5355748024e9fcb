//! Resource fetching: one blocking HTTP GET per URL.
//!
//! Uses the curl crate (libcurl). There is no retry: a transport error,
//! timeout or non-2xx status is reported once and the caller decides what
//! to do with it.

mod error;

#[cfg(test)]
pub(crate) mod memory;

pub use error::FetchError;

use crate::config::HttpConfig;
use std::time::Duration;

/// Anything that can turn a URL into a response body.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch(url)
    }
}

/// libcurl-backed fetcher. A fresh Easy handle is used per request.
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    timeout: Duration,
    connect_timeout: Duration,
    user_agent: Option<String>,
}

impl CurlFetcher {
    pub fn new(http: &HttpConfig) -> Self {
        Self {
            timeout: Duration::from_secs(http.timeout_secs),
            connect_timeout: Duration::from_secs(http.connect_timeout_secs),
            user_agent: http.user_agent.clone(),
        }
    }
}

impl Default for CurlFetcher {
    fn default() -> Self {
        Self::new(&HttpConfig::default())
    }
}

impl Fetcher for CurlFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;
        if let Some(ua) = &self.user_agent {
            easy.useragent(ua)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        if !(200..300).contains(&status) {
            return Err(FetchError::Http { status });
        }
        tracing::debug!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(String::from_utf8(body)?)
    }
}
