// Invocation of the external super-resolution binary with file-based I/O

use std::path::PathBuf;

use image::{DynamicImage, ImageFormat};
use tokio::{process::Command, task, time::timeout};
use tracing::{error, info};

use super::{EnhancerConfig, SCALE_FACTOR, error::EnhanceError};

const INPUT_FILE: &str = "input.png";
const OUTPUT_FILE: &str = "output.png";

/// Prefix of the per-invocation workspace directory under the temp root.
pub(super) const WORKSPACE_PREFIX: &str = "enhance-ws-";

/// Runs the external tool over `image` through a scoped temp workspace.
///
/// The caller must have confirmed availability via the probe; this function
/// does not re-probe. The workspace holds exactly `input.png` and, on
/// success, `output.png`, and is removed on every exit path.
pub(super) async fn invoke_external(
    config: &EnhancerConfig,
    image: DynamicImage,
) -> Result<DynamicImage, EnhanceError> {
    // TempDir removes the workspace on drop, covering all returns below.
    let workspace = tempfile::Builder::new()
        .prefix(WORKSPACE_PREFIX)
        .tempdir()
        .map_err(|err| EnhanceError::ExternalTool(format!("cannot create workspace: {err}")))?;

    let input_path = workspace.path().join(INPUT_FILE);
    let output_path = workspace.path().join(OUTPUT_FILE);

    write_input(image, input_path.clone()).await?;

    let mut command = Command::new(&config.binary);
    command
        .arg("-i")
        .arg(&input_path)
        .arg("-o")
        .arg(&output_path)
        .arg("-n")
        .arg(&config.model_name)
        .arg("-m")
        .arg(&config.model_dir)
        .arg("-s")
        .arg(SCALE_FACTOR.to_string())
        .arg("-f")
        .arg("png")
        .kill_on_drop(true);

    info!("Running external enhancer: {:?}", command.as_std());

    let output = match timeout(config.tool_timeout, command.output()).await {
        Err(_) => {
            error!(
                "External enhancer timed out after {:?}",
                config.tool_timeout
            );
            return Err(EnhanceError::ExternalTool("timeout".to_string()));
        }
        Ok(Err(err)) => {
            return Err(EnhanceError::ExternalTool(format!(
                "failed to execute external enhancer: {err}"
            )));
        }
        Ok(Ok(output)) => output,
    };

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    info!("External enhancer stdout: {}", stdout);
    info!("External enhancer stderr: {}", stderr);

    if !output.status.success() {
        error!("External enhancer exited with {}", output.status);
        return Err(EnhanceError::ExternalTool(stderr.into_owned()));
    }

    if !output_path.exists() {
        return Err(EnhanceError::ExternalTool("output not found".to_string()));
    }

    let enhanced = task::spawn_blocking(move || image::open(&output_path))
        .await?
        .map_err(|err| {
            error!("Cannot decode external enhancer output: {}", err);
            EnhanceError::ExternalTool("unreadable result".to_string())
        })?;

    drop(workspace);
    Ok(enhanced)
}

async fn write_input(image: DynamicImage, path: PathBuf) -> Result<(), EnhanceError> {
    task::spawn_blocking(move || image.save_with_format(&path, ImageFormat::Png))
        .await?
        .map_err(|err| {
            EnhanceError::ExternalTool(format!("cannot write workspace input: {err}"))
        })
}
