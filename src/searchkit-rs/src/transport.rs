use reqwest::{Client as HttpClient, Method, Url};
use searchkit_core::{Error, RawResponse, Result};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Performs a single HTTP request/response cycle against the engine.
///
/// One attempt per call: no retry, no backoff. The configured timeout is
/// applied to every request issued through this transport.
#[derive(Debug)]
pub(crate) struct Transport {
    http: HttpClient,
}

impl Transport {
    pub(crate) fn new(timeout_ms: u64) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| Error::Transport {
                status: 500,
                message: e.to_string(),
            })?;
        Ok(Self { http })
    }

    /// Send one request and decode the raw outcome.
    ///
    /// `Content-Type: application/json` is set only when a body is present.
    /// I/O failures map to [`Error::Transport`]: status 500 for timeouts,
    /// 504 for everything else.
    pub(crate) async fn send<B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        debug!("{} {}", method, url);

        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(map_io_error)?;
        let status_code = response.status().as_u16();
        let bytes = response.bytes().await.map_err(map_io_error)?;

        Ok(RawResponse::decode(status_code, &bytes))
    }
}

fn map_io_error(e: reqwest::Error) -> Error {
    let status = if e.is_timeout() { 500 } else { 504 };
    Error::Transport {
        status,
        message: e.to_string(),
    }
}
