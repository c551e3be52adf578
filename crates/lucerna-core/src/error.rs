use thiserror::Error;

/// Errors that can occur during Lucerna initialization.
///
/// Runtime GPU failures (allocation, pathological pass durations) are not
/// represented here — a broken rendering context has no recovery path and
/// aborts the process instead.
#[derive(Debug, Error)]
pub enum LucernaError {
    #[error("GPU adapter not found: {0}")]
    AdapterNotFound(String),

    #[error("Failed to request GPU device: {0}")]
    DeviceRequestFailed(String),

    #[error("Scene config parse failed: {0}")]
    ConfigParseFailed(String),
}
