//! Blocking HTTP chart source.

use super::{ChartSource, FetchError};
use chartwatch_core::errors::Result;
use std::time::Duration;

/// Desktop browser identity; the chart site serves a reduced page to
/// unknown agents.
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Fetches the chart page with a single GET.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    timeout: Duration,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    /// # Errors
    ///
    /// - `ExternalService`: the HTTP client could not be built
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let url = url.into();
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport {
                url: url.clone(),
                message: e.to_string(),
            })?;
        Ok(Self {
            url,
            timeout,
            client,
        })
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                url: self.url.clone(),
                secs: self.timeout.as_secs(),
            }
        } else {
            FetchError::Transport {
                url: self.url.clone(),
                message: err.to_string(),
            }
        }
    }
}

impl ChartSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT_LANGUAGE, "zh-CN,zh;q=0.9,en;q=0.8")
            .send()
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            }
            .into());
        }

        let body = response.text().map_err(|e| self.classify(e))?;
        tracing::debug!(url = %self.url, bytes = body.len(), "chart page fetched");
        Ok(body)
    }
}
