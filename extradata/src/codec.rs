use tracing::{debug, warn};

use crate::constants::MAX_NESTING_DEPTH;
use crate::error::CodecError;
use crate::extradata::ExtraData;

/// Converts [`ExtraData`] to and from the text stored in a storage column.
///
/// The codec is stateless: copy it into whichever component needs it.
/// A `None` column means "no metadata yet" and decodes to an empty mapping.
/// Present text that cannot be read is an error, never an empty mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtraDataCodec;

impl ExtraDataCodec {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    pub fn decode(&self, text: Option<&str>) -> Result<ExtraData, CodecError> {
        let Some(text) = text else {
            debug!("No stored extra data, using empty mapping");
            return Ok(ExtraData::new());
        };

        let data: ExtraData = serde_json::from_str(text)
            .map_err(|e| CodecError::MalformedExtraData(e.to_string()))?;

        if !data.fits_depth(MAX_NESTING_DEPTH) {
            return Err(CodecError::MalformedExtraData(format!(
                "nesting deeper than {MAX_NESTING_DEPTH} levels"
            )));
        }

        debug!(keys = data.len(), bytes = text.len(), "Decoded extra data");
        Ok(data)
    }

    /// Compact, canonical text: keys sorted, no whitespace.
    pub fn encode(&self, data: &ExtraData) -> Result<String, CodecError> {
        Self::check_encodable(data)?;
        let text = serde_json::to_string(data)
            .map_err(|e| CodecError::SerializationError(e.to_string()))?;
        debug!(keys = data.len(), bytes = text.len(), "Encoded extra data");
        Ok(text)
    }

    pub fn encode_pretty(&self, data: &ExtraData) -> Result<String, CodecError> {
        Self::check_encodable(data)?;
        serde_json::to_string_pretty(data)
            .map_err(|e| CodecError::SerializationError(e.to_string()))
    }

    /// Like [`decode`](Self::decode), but corrupt text is logged and replaced
    /// by an empty mapping. For callers that prefer losing one entity's
    /// metadata to failing the whole read.
    #[must_use]
    pub fn decode_or_default(&self, text: Option<&str>) -> ExtraData {
        self.decode(text).unwrap_or_else(|e| {
            warn!("Discarding unreadable extra data: {e}");
            ExtraData::new()
        })
    }

    fn check_encodable(data: &ExtraData) -> Result<(), CodecError> {
        if data.fits_depth(MAX_NESTING_DEPTH) {
            Ok(())
        } else {
            Err(CodecError::SerializationError(format!(
                "nesting deeper than {MAX_NESTING_DEPTH} levels"
            )))
        }
    }
}
