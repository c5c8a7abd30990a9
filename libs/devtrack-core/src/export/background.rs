//! Off-thread export with a deadline

use crate::error::{Result, TrackerError};
use crate::export::{ExportArtifact, ExportFormat, ReportRenderer};
use crate::models::ReportPayload;
use std::time::Duration;
use tokio::task;
use tracing::{info, warn};

/// Render one payload on tokio's blocking pool
///
/// Rendering is CPU-bound, so it runs off the async workers. If the deadline
/// passes the rendered result is discarded; dropping the returned future
/// likewise abandons it.
///
/// # Errors
/// Returns `TrackerError::Timeout` when the deadline passes, any rendering
/// error, or `TrackerError::Unknown` if the blocking task panicked
pub async fn export_in_background(
    renderer: ReportRenderer,
    payload: ReportPayload,
    format: ExportFormat,
    deadline: Duration,
) -> Result<ExportArtifact> {
    let handle = task::spawn_blocking(move || renderer.render(&payload, format));

    match tokio::time::timeout(deadline, handle).await {
        Ok(Ok(result)) => {
            if let Ok(artifact) = &result {
                info!(filename = %artifact.filename, "background export finished");
            }
            result
        }
        Ok(Err(join_error)) => Err(TrackerError::unknown(format!(
            "export task failed: {join_error}"
        ))),
        Err(_) => {
            warn!(?deadline, %format, "background export timed out");
            Err(TrackerError::Timeout {
                seconds: deadline.as_secs(),
            })
        }
    }
}
