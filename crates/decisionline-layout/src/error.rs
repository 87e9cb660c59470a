//! Error types for the layout core.

/// Contract violations raised by the layout core.
///
/// Numeric degeneracies (equal timestamps, zero factor weight) are resolved
/// internally and never surface here.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("cannot build a time scale over an empty event set")]
    EmptyDomain,

    #[error("invalid layout config: {0}")]
    InvalidConfig(String),
}

pub type LayoutResult<T> = Result<T, LayoutError>;
