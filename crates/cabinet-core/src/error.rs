use crate::minister::MinisterId;
use crate::ministry::Ministry;

/// Alias for `Result<T, CabinetError>`.
pub type CabinetResult<T> = Result<T, CabinetError>;

/// Errors that can occur when manipulating the roster.
#[derive(Debug, thiserror::Error)]
pub enum CabinetError {
    /// The requested minister is not (or no longer) in the roster.
    #[error("minister not found: {0}")]
    MinisterNotFound(MinisterId),

    /// A minister with this ID is already on the roster.
    #[error("minister already on the roster: {0}")]
    DuplicateMinister(MinisterId),

    /// Two ministers claim the same office.
    #[error("position already taken: {0}")]
    PositionTaken(Ministry),

    /// An operation needing two distinct ministers got the same one twice.
    #[error("expected two different ministers, got {0} twice")]
    SameMinister(MinisterId),

    /// A record in a roster snapshot could not be decoded.
    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Errors raised while decoding a flat minister record.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// A required key is absent.
    #[error("missing field: {0}")]
    MissingField(String),

    /// A key holds the wrong kind of value.
    #[error("field '{field}' should be {expected}")]
    WrongType {
        /// The offending key.
        field: String,
        /// What kind of value was expected.
        expected: &'static str,
    },

    /// A key holds a value outside its legal range or vocabulary.
    #[error("invalid value for '{field}': {value}")]
    InvalidValue {
        /// The offending key.
        field: String,
        /// The value as found.
        value: String,
    },
}
