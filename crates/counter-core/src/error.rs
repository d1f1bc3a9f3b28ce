use thiserror::Error;

/// Failure importing a [`CoreSnapshot`](crate::CoreSnapshot).
///
/// This is the only error type in the crate: edge updates and output reads
/// are total over their inputs and never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum SnapshotLayoutError {
    /// The snapshot declares a schema revision this build does not know.
    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u16),
}
