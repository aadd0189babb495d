// Availability probe for the external enhancement tool

use tokio::process::Command;
use tracing::{info, warn};

use super::EnhancerConfig;

/// Marker substring the tool prints in its help text when it is functional.
const USAGE_MARKER: &str = "Usage:";

/// Checks whether the configured external binary is present and functional by
/// running it with `-h` and looking for the usage marker in either output
/// stream. The tool exits non-zero when printing help, so the exit status is
/// deliberately ignored. A spawn failure (binary missing, not executable)
/// means unavailable.
///
/// The result is never cached; callers probe fresh on every enhancement.
pub(super) async fn probe(config: &EnhancerConfig) -> bool {
    let output = match Command::new(&config.binary).arg("-h").output().await {
        Ok(output) => output,
        Err(err) => {
            warn!("External enhancer probe failed to execute: {}", err);
            return false;
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    info!("External enhancer probe stdout: {}", stdout);
    info!("External enhancer probe stderr: {}", stderr);

    stdout.contains(USAGE_MARKER) || stderr.contains(USAGE_MARKER)
}
