use thiserror::Error;

/// Engine-level error type.
///
/// Only two failure classes ever cross the crate boundary: reference data
/// that fails validation at load time, and profile-store I/O. Everything
/// else (unknown skill names, empty inputs, degenerate scenarios) resolves
/// to documented defaults instead of erroring.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Reference data error: {0}")]
    ReferenceData(String),

    #[error("Profile store error: {0}")]
    Store(String),
}
