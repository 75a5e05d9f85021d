#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Stored text is present but is not a JSON object we can represent.
    #[error("Malformed extra data: {0}")]
    MalformedExtraData(String),
    /// The in-memory value cannot be written as JSON.
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

impl CodecError {
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedExtraData(_))
    }

    #[must_use]
    pub const fn is_serialization(&self) -> bool {
        matches!(self, Self::SerializationError(_))
    }
}
