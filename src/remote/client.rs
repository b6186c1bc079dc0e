//! Stable Diffusion web UI client.
//!
//! # Responsibilities
//! - Execute `txt2img` renders against a backend and decode the result
//! - Serve as the probe target via the cheap samplers route
//! - Translate transport failures into the [`BackendError`] taxonomy

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use url::Url;

use crate::remote::types::{BackendError, RenderParams, SdModel, Txt2ImgResponse};
use crate::remote::RenderBackend;

const TXT2IMG_ROUTE: &str = "sdapi/v1/txt2img";
const SAMPLERS_ROUTE: &str = "sdapi/v1/samplers";
const MODELS_ROUTE: &str = "sdapi/v1/sd-models";

/// HTTP client for the Stable Diffusion web UI API.
///
/// One instance serves every endpoint in the pool; the base URL is supplied
/// per call so the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct WebuiClient {
    http: reqwest::Client,
    request_timeout: Duration,
    probe_timeout: Duration,
}

impl WebuiClient {
    /// Create a new client.
    ///
    /// `request_timeout` bounds render calls, `probe_timeout` bounds the
    /// metadata routes used for probing.
    pub fn new(
        request_timeout: Duration,
        probe_timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().no_proxy().build()?;
        Ok(Self {
            http,
            request_timeout,
            probe_timeout,
        })
    }

    /// List the checkpoints installed on a backend.
    pub async fn list_models(&self, endpoint: &Url) -> Result<Vec<SdModel>, BackendError> {
        let response = self
            .http
            .get(route(endpoint, MODELS_ROUTE))
            .timeout(self.probe_timeout)
            .send()
            .await
            .map_err(|e| classify(e, self.probe_timeout))?;

        if !response.status().is_success() {
            return Err(BackendError::Status(response.status().as_u16()));
        }

        response
            .json::<Vec<SdModel>>()
            .await
            .map_err(|e| BackendError::Malformed(e.to_string()))
    }
}

#[async_trait::async_trait]
impl RenderBackend for WebuiClient {
    async fn generate(
        &self,
        endpoint: &Url,
        params: &RenderParams,
    ) -> Result<Vec<Vec<u8>>, BackendError> {
        let response = self
            .http
            .post(route(endpoint, TXT2IMG_ROUTE))
            .json(params)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| classify(e, self.request_timeout))?;

        if !response.status().is_success() {
            return Err(BackendError::Status(response.status().as_u16()));
        }

        let body: Txt2ImgResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Malformed(e.to_string()))?;

        if body.images.is_empty() {
            return Err(BackendError::Malformed("empty image list".to_string()));
        }

        body.images
            .iter()
            .map(|encoded| {
                BASE64
                    .decode(encoded)
                    .map_err(|e| BackendError::Malformed(format!("invalid base64: {e}")))
            })
            .collect()
    }

    async fn ping(&self, endpoint: &Url) -> Result<(), BackendError> {
        let response = self
            .http
            .get(route(endpoint, SAMPLERS_ROUTE))
            .timeout(self.probe_timeout)
            .send()
            .await
            .map_err(|e| classify(e, self.probe_timeout))?;

        if !response.status().is_success() {
            return Err(BackendError::Status(response.status().as_u16()));
        }
        Ok(())
    }
}

/// Build a route URL regardless of whether the base carries a trailing slash.
fn route(endpoint: &Url, path: &str) -> String {
    format!("{}/{}", endpoint.as_str().trim_end_matches('/'), path)
}

fn classify(err: reqwest::Error, deadline: Duration) -> BackendError {
    if err.is_timeout() {
        BackendError::Timeout(deadline.as_secs())
    } else {
        BackendError::Connect(err.to_string())
    }
}
