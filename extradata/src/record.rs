use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::column::ColumnConverter;
use crate::constants::MAX_ENTITY_ID_LENGTH;
use crate::error::CodecError;
use crate::extradata::ExtraData;

#[derive(Debug, Clone)]
pub struct InvalidEntityKind(pub String);

impl fmt::Display for InvalidEntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for InvalidEntityKind {}

#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Message,
    Channel,
    User,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message => write!(f, "message"),
            Self::Channel => write!(f, "channel"),
            Self::User => write!(f, "user"),
        }
    }
}

impl FromStr for EntityKind {
    type Err = InvalidEntityKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "message" => Ok(Self::Message),
            "channel" => Ok(Self::Channel),
            "user" => Ok(Self::User),
            _ => Err(InvalidEntityKind(format!(
                "invalid entity kind: '{s}' (expected 'message', 'channel' or 'user')"
            ))),
        }
    }
}

/// A stored chat entity row. `extra_data` holds the raw column text and is
/// `None` for rows written before any metadata existed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntityRecord {
    pub kind: EntityKind,
    pub id: String,
    #[serde(default)]
    pub extra_data: Option<String>,
}

impl EntityRecord {
    #[must_use]
    pub fn new(kind: EntityKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            extra_data: None,
        }
    }

    pub fn with_extra_data<C>(
        kind: EntityKind,
        id: impl Into<String>,
        data: &ExtraData,
        converter: &C,
    ) -> Result<Self, CodecError>
    where
        C: ColumnConverter<Value = ExtraData>,
    {
        let mut record = Self::new(kind, id);
        record.validate()?;
        record.set_extra_data(data, converter)?;
        Ok(record)
    }

    pub fn extra_data<C>(&self, converter: &C) -> Result<ExtraData, CodecError>
    where
        C: ColumnConverter<Value = ExtraData>,
    {
        converter.read_column(self.extra_data.as_deref())
    }

    /// The column is left untouched when the new value cannot be encoded.
    pub fn set_extra_data<C>(&mut self, data: &ExtraData, converter: &C) -> Result<(), CodecError>
    where
        C: ColumnConverter<Value = ExtraData>,
    {
        self.extra_data = Some(converter.write_column(data)?);
        Ok(())
    }

    pub fn validate(&self) -> Result<(), CodecError> {
        if self.id.trim().is_empty() {
            return Err(CodecError::InvalidRecord(format!(
                "{} id cannot be empty",
                self.kind
            )));
        }
        if self.id.len() > MAX_ENTITY_ID_LENGTH {
            return Err(CodecError::InvalidRecord(format!(
                "{} id must be at most {MAX_ENTITY_ID_LENGTH} bytes",
                self.kind
            )));
        }
        Ok(())
    }
}
