use cabinet_core::CabinetError;

/// Alias for `Result<T, MechError>`.
pub type MechResult<T> = Result<T, MechError>;

/// Errors that can occur while resolving game mechanics.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// A roster lookup or transfer failed.
    #[error(transparent)]
    Cabinet(#[from] CabinetError),

    /// A check with nonsensical thresholds.
    #[error("invalid check: {0}")]
    InvalidCheck(String),
}
