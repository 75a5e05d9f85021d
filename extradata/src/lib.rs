pub mod codec;
pub mod column;
pub mod constants;
pub mod error;
pub mod extradata;
pub mod number;
pub mod record;
pub mod value;

pub use codec::ExtraDataCodec;
pub use column::ColumnConverter;
pub use error::CodecError;
pub use extradata::ExtraData;
pub use number::Number;
pub use record::{EntityKind, EntityRecord, InvalidEntityKind};
pub use value::ExtraValue;
