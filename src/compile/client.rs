//! HTTP client for the compile service.

use anyhow::{Context, Result};
use thiserror::Error;
use url::Url;

use super::protocol::{CompileRequest, CompileResponse};

/// Transport/protocol failures when contacting the compile service.
///
/// The workflow controller converts all of these into session state; they
/// never propagate to the caller of `run()`.
#[derive(Debug, Error)]
pub enum CompileServiceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("service returned a malformed body: {0}")]
    MalformedBody(#[source] reqwest::Error),
}

/// Client for the remote compile/analyze service.
///
/// One outstanding request at a time by protocol; no timeout is imposed on
/// the call - the session's in-flight guard is the only backpressure.
#[derive(Debug, Clone)]
pub struct CompileClient {
    http: reqwest::Client,
    endpoint: Url,
    compile_url: Url,
}

impl CompileClient {
    /// Create a client for the service at `endpoint`
    /// (e.g. `http://127.0.0.1:5000`).
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .with_context(|| format!("invalid compile service endpoint '{endpoint}'"))?;
        let compile_url = endpoint
            .join("compile")
            .context("failed to build /compile URL")?;

        Ok(Self {
            http: reqwest::Client::new(),
            endpoint,
            compile_url,
        })
    }

    /// Submit source text for compilation and analysis.
    ///
    /// Non-2xx responses are reported as `CompileServiceError::Status`
    /// regardless of their body; the caller treats every variant uniformly
    /// as a transport failure.
    pub async fn compile(&self, source: &str) -> Result<CompileResponse, CompileServiceError> {
        let response = self
            .http
            .post(self.compile_url.clone())
            .json(&CompileRequest {
                source_code: source,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CompileServiceError::Status(status));
        }

        response
            .json::<CompileResponse>()
            .await
            .map_err(CompileServiceError::MalformedBody)
    }

    /// Base endpoint, for diagnostics.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_url_from_endpoint() {
        let client = CompileClient::new("http://127.0.0.1:5000").unwrap();
        assert_eq!(client.compile_url.as_str(), "http://127.0.0.1:5000/compile");
        assert_eq!(client.endpoint().as_str(), "http://127.0.0.1:5000/");
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        assert!(CompileClient::new("not a url").is_err());
    }
}
