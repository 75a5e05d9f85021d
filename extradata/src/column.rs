use crate::codec::ExtraDataCodec;
use crate::error::CodecError;
use crate::extradata::ExtraData;

/// Hook a persistence layer calls to turn a nullable text column into a
/// typed value on read, and back into text on write.
pub trait ColumnConverter {
    type Value;

    fn read_column(&self, column: Option<&str>) -> Result<Self::Value, CodecError>;

    fn write_column(&self, value: &Self::Value) -> Result<String, CodecError>;
}

impl ColumnConverter for ExtraDataCodec {
    type Value = ExtraData;

    fn read_column(&self, column: Option<&str>) -> Result<ExtraData, CodecError> {
        self.decode(column)
    }

    fn write_column(&self, value: &ExtraData) -> Result<String, CodecError> {
        self.encode(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ExtraValue;

    fn roundtrip<C: ColumnConverter>(converter: &C, value: &C::Value) -> C::Value {
        let column = converter.write_column(value).unwrap();
        converter.read_column(Some(&column)).unwrap()
    }

    #[test]
    fn test_extra_data_column_roundtrip() {
        let mut data = ExtraData::new();
        data.insert("pinned", true);
        data.insert("labels", vec!["faq"]);
        assert_eq!(roundtrip(&ExtraDataCodec::new(), &data), data);
    }

    #[test]
    fn test_extra_data_column_null() {
        let data = ExtraDataCodec::new().read_column(None).unwrap();
        assert_eq!(data, ExtraData::new());
    }

    #[test]
    fn test_extra_data_column_corrupt() {
        let err = ExtraDataCodec::new().read_column(Some("{,}")).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_extra_data_column_unencodable() {
        let mut data = ExtraData::new();
        data.insert("ratio", ExtraValue::from(f64::NAN));
        assert!(ExtraDataCodec::new().write_column(&data).unwrap_err().is_serialization());
    }
}
