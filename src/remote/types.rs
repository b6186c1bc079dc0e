//! Wire types and error definitions for the render backend protocol.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while talking to a render backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Connection-level failure (refused, reset, DNS).
    #[error("connection error: {0}")]
    Connect(String),

    /// The call did not complete within the configured deadline.
    #[error("timed out after {0} seconds")]
    Timeout(u64),

    /// The backend answered with a non-success status.
    #[error("backend returned status {0}")]
    Status(u16),

    /// The backend answered, but the body was not what the protocol promises.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Parameters for one text-to-image render.
///
/// Field names and defaults follow the Stable Diffusion web UI
/// `txt2img` payload. The gateway treats the whole struct as opaque;
/// prompt enrichment happens upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderParams {
    /// Main prompt describing the desired image.
    pub prompt: String,

    /// Things to avoid in generation.
    pub negative_prompt: String,

    /// Number of denoising steps.
    pub steps: u32,

    /// Classifier-free guidance scale.
    pub cfg_scale: f32,

    /// Image width in pixels.
    pub width: u32,

    /// Image height in pixels.
    pub height: u32,

    /// Random seed (-1 for random).
    pub seed: i64,

    /// Images per batch.
    pub batch_size: u32,

    /// Number of batches.
    pub n_iter: u32,

    /// Sampler to use.
    pub sampler_name: String,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            negative_prompt: String::new(),
            steps: 24,
            cfg_scale: 4.5,
            width: 1024,
            height: 1024,
            seed: -1,
            batch_size: 1,
            n_iter: 1,
            sampler_name: "Euler a".to_string(),
        }
    }
}

impl RenderParams {
    /// Convenience constructor for a prompt with default settings.
    pub fn for_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }
}

/// Response body of the `txt2img` route.
#[derive(Debug, Deserialize)]
pub(crate) struct Txt2ImgResponse {
    /// Base64-encoded images.
    pub images: Vec<String>,
}

/// One installed checkpoint, as reported by the backend's model route.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SdModel {
    /// Display title (checkpoint file plus hash).
    pub title: String,

    /// Bare model name.
    pub model_name: String,
}
