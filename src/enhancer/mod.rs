// Enhancement orchestration: probe the external tool, dispatch to the
// external invoker or the classical fallback, and encode the result.

mod error;
mod external;
mod fallback;
mod probe;

pub use error::EnhanceError;

use std::{
    io::Cursor,
    path::PathBuf,
    time::Duration,
};

use image::{DynamicImage, ImageFormat};
use tokio::task;
use tracing::info;

/// Upscale factor shared by both strategies so output dimensions stay
/// consistent whichever path runs.
pub const SCALE_FACTOR: u32 = 4;

/// Process-wide enhancer configuration, constructed once at startup from the
/// command line and injected here.
#[derive(Debug, Clone)]
pub struct EnhancerConfig {
    /// Path to the external super-resolution binary.
    pub binary: PathBuf,
    /// Directory holding the model files passed to the binary via `-m`.
    pub model_dir: PathBuf,
    /// Model identifier passed to the binary via `-n`.
    pub model_name: String,
    /// Bounded wait for a single external invocation.
    pub tool_timeout: Duration,
}

/// Which enhancement path produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    External,
    Fallback,
}

/// Encoded output of a single enhancement call.
#[derive(Debug)]
pub struct EnhancementResult {
    /// PNG-encoded enhanced image.
    pub png: Vec<u8>,
    pub strategy: Strategy,
    /// Why the fallback ran, when it was forced by the external path.
    pub reason: Option<String>,
}

/// Stateless enhancement service. Holds only immutable configuration; every
/// call is independent and request-scoped.
pub struct Enhancer {
    config: EnhancerConfig,
}

impl Enhancer {
    pub fn new(config: EnhancerConfig) -> Self {
        Self { config }
    }

    /// Enhances raw uploaded image bytes, returning PNG output and strategy
    /// metadata.
    ///
    /// Linear pipeline: decode, probe, invoke-or-fallback, encode. A probe
    /// that reports the tool unavailable routes to the fallback; a failure of
    /// the external invocation itself is terminal and is NOT downgraded to
    /// the fallback.
    pub async fn enhance(&self, raw: Vec<u8>) -> Result<EnhancementResult, EnhanceError> {
        let image = task::spawn_blocking(move || image::load_from_memory(&raw))
            .await?
            .map_err(EnhanceError::Decode)?;

        // Availability is probed fresh on every call, never cached.
        let (enhanced, strategy, reason) = if probe::probe(&self.config).await {
            let result = external::invoke_external(&self.config, image).await?;
            info!("Image enhanced with external tool");
            (result, Strategy::External, None)
        } else {
            info!("External tool unavailable, using classical fallback");
            let result =
                task::spawn_blocking(move || fallback::fallback_enhance(&image)).await?;
            (
                result,
                Strategy::Fallback,
                Some("external tool unavailable".to_string()),
            )
        };

        let png = task::spawn_blocking(move || encode_png(&enhanced)).await??;

        Ok(EnhancementResult {
            png,
            strategy,
            reason,
        })
    }
}

fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, EnhanceError> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(EnhanceError::Encode)?;
    Ok(buffer.into_inner())
}
