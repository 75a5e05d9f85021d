use std::fmt;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::extradata::ExtraData;
use crate::number::Number;

/// A single metadata value: the JSON value model as a closed type.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ExtraValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<ExtraValue>),
    Object(ExtraData),
}

impl ExtraValue {
    /// Name of the variant as it appears in JSON terminology.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Null | Self::Number(_) | Self::String(_) | Self::Array(_) | Self::Object(_) => {
                None
            }
        }
    }

    #[must_use]
    pub const fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            Self::Null | Self::Bool(_) | Self::String(_) | Self::Array(_) | Self::Object(_) => {
                None
            }
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Null | Self::Bool(_) | Self::Number(_) | Self::Array(_) | Self::Object(_) => {
                None
            }
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items),
            Self::Null | Self::Bool(_) | Self::Number(_) | Self::String(_) | Self::Object(_) => {
                None
            }
        }
    }

    #[must_use]
    pub const fn as_object(&self) -> Option<&ExtraData> {
        match self {
            Self::Object(map) => Some(map),
            Self::Null | Self::Bool(_) | Self::Number(_) | Self::String(_) | Self::Array(_) => {
                None
            }
        }
    }

    /// Nesting depth of this value. Scalars are 0, containers add one level.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Array(items) => items
                .iter()
                .map(Self::depth)
                .max()
                .unwrap_or(0)
                .saturating_add(1),
            Self::Object(map) => map.depth(),
            Self::Null | Self::Bool(_) | Self::Number(_) | Self::String(_) => 0,
        }
    }

    /// Returns `false` as soon as a container sits deeper than `limit`
    /// levels, without walking the rest of the tree.
    #[must_use]
    pub fn fits_depth(&self, limit: usize) -> bool {
        match self {
            Self::Array(items) => limit
                .checked_sub(1)
                .is_some_and(|rest| items.iter().all(|item| item.fits_depth(rest))),
            Self::Object(map) => map.fits_depth(limit),
            Self::Null | Self::Bool(_) | Self::Number(_) | Self::String(_) => true,
        }
    }
}

impl From<bool> for ExtraValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for ExtraValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for ExtraValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Number> for ExtraValue {
    fn from(v: Number) -> Self {
        Self::Number(v)
    }
}

impl From<i64> for ExtraValue {
    fn from(v: i64) -> Self {
        Self::Number(Number::from(v))
    }
}

impl From<u64> for ExtraValue {
    fn from(v: u64) -> Self {
        Self::Number(Number::from(v))
    }
}

impl From<i32> for ExtraValue {
    fn from(v: i32) -> Self {
        Self::Number(Number::from(v))
    }
}

impl From<u32> for ExtraValue {
    fn from(v: u32) -> Self {
        Self::Number(Number::from(v))
    }
}

impl From<f64> for ExtraValue {
    fn from(v: f64) -> Self {
        Self::Number(Number::from(v))
    }
}

impl From<ExtraData> for ExtraValue {
    fn from(v: ExtraData) -> Self {
        Self::Object(v)
    }
}

impl<T: Into<Self>> From<Vec<T>> for ExtraValue {
    fn from(v: Vec<T>) -> Self {
        Self::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for ExtraValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl From<serde_json::Value> for ExtraValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::from(i)
                } else if let Some(u) = n.as_u64() {
                    Self::from(u)
                } else {
                    n.as_f64().map_or(Self::Null, Self::from)
                }
            }
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for ExtraValue {
    /// Compact JSON. Non-finite floats, which JSON cannot carry, are shown as
    /// `null` here; only the codec reports them as errors.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) if !n.is_finite() => write!(f, "null"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => {
                let quoted = serde_json::to_string(s).map_err(|_| fmt::Error)?;
                write!(f, "{quoted}")
            }
            Self::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Object(map) => write!(f, "{map}"),
        }
    }
}

impl Serialize for ExtraValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::Array(items) => items.serialize(serializer),
            Self::Object(map) => map.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for ExtraValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ExtraValueVisitor;

        impl<'de> Visitor<'de> for ExtraValueVisitor {
            type Value = ExtraValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any JSON value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<ExtraValue, E>
            where
                E: de::Error,
            {
                Ok(ExtraValue::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<ExtraValue, E>
            where
                E: de::Error,
            {
                Ok(ExtraValue::from(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<ExtraValue, E>
            where
                E: de::Error,
            {
                Ok(ExtraValue::from(value))
            }

            fn visit_f64<E>(self, value: f64) -> Result<ExtraValue, E>
            where
                E: de::Error,
            {
                Ok(ExtraValue::from(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<ExtraValue, E>
            where
                E: de::Error,
            {
                Ok(ExtraValue::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<ExtraValue, E>
            where
                E: de::Error,
            {
                Ok(ExtraValue::String(value))
            }

            fn visit_unit<E>(self) -> Result<ExtraValue, E>
            where
                E: de::Error,
            {
                Ok(ExtraValue::Null)
            }

            fn visit_none<E>(self) -> Result<ExtraValue, E>
            where
                E: de::Error,
            {
                Ok(ExtraValue::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<ExtraValue, D::Error>
            where
                D: Deserializer<'de>,
            {
                ExtraValue::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<ExtraValue, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(1024));
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(ExtraValue::Array(items))
            }

            fn visit_map<A>(self, map: A) -> Result<ExtraValue, A::Error>
            where
                A: MapAccess<'de>,
            {
                ExtraData::from_map_access(map).map(ExtraValue::Object)
            }
        }

        deserializer.deserialize_any(ExtraValueVisitor)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_value_kind() {
        assert_eq!(ExtraValue::Null.kind(), "null");
        assert_eq!(ExtraValue::from(true).kind(), "bool");
        assert_eq!(ExtraValue::from(3).kind(), "number");
        assert_eq!(ExtraValue::from("x").kind(), "string");
        assert_eq!(ExtraValue::from(vec![1, 2]).kind(), "array");
        assert_eq!(ExtraValue::from(ExtraData::new()).kind(), "object");
    }

    #[test]
    fn test_extra_value_accessors() {
        assert_eq!(ExtraValue::from(true).as_bool(), Some(true));
        assert_eq!(ExtraValue::from("abc").as_str(), Some("abc"));
        assert_eq!(ExtraValue::from(7).as_number(), Some(&Number::from(7)));
        assert_eq!(ExtraValue::from(vec!["a"]).as_array().map(<[_]>::len), Some(1));
        assert!(ExtraValue::from(ExtraData::new()).as_object().is_some());
        assert!(ExtraValue::Null.is_null());
        assert_eq!(ExtraValue::from("abc").as_bool(), None);
        assert_eq!(ExtraValue::from(1).as_str(), None);
    }

    #[test]
    fn test_extra_value_from_option() {
        assert_eq!(ExtraValue::from(None::<i64>), ExtraValue::Null);
        assert_eq!(ExtraValue::from(Some("x")), ExtraValue::from("x"));
    }

    #[test]
    fn test_extra_value_from_serde_json() {
        let value = ExtraValue::from(serde_json::json!({
            "n": 1,
            "big": u64::MAX,
            "f": 0.5,
            "list": [null, false, "s"],
        }));
        let map = value.as_object().unwrap();
        assert_eq!(map.get("n"), Some(&ExtraValue::from(1)));
        assert_eq!(map.get("big"), Some(&ExtraValue::from(u64::MAX)));
        assert_eq!(map.get("f"), Some(&ExtraValue::from(0.5)));
        assert_eq!(
            map.get("list"),
            Some(&ExtraValue::Array(vec![
                ExtraValue::Null,
                ExtraValue::Bool(false),
                ExtraValue::from("s"),
            ]))
        );
    }

    #[test]
    fn test_extra_value_depth() {
        assert_eq!(ExtraValue::from("leaf").depth(), 0);
        assert_eq!(ExtraValue::Array(Vec::new()).depth(), 1);
        assert_eq!(ExtraValue::from(vec![vec![1]]).depth(), 2);
        assert!(ExtraValue::from(vec![vec![1]]).fits_depth(2));
        assert!(!ExtraValue::from(vec![vec![1]]).fits_depth(1));
        assert!(ExtraValue::from(1).fits_depth(0));
    }

    #[test]
    fn test_extra_value_deserialize_any() {
        let value: ExtraValue = serde_json::from_str(r#"[1, -2, 2.5, "x", true, null, {}]"#).unwrap();
        assert_eq!(
            value,
            ExtraValue::Array(vec![
                ExtraValue::from(1),
                ExtraValue::from(-2),
                ExtraValue::from(2.5),
                ExtraValue::from("x"),
                ExtraValue::from(true),
                ExtraValue::Null,
                ExtraValue::Object(ExtraData::new()),
            ])
        );
    }

    #[test]
    fn test_extra_value_deserialize_rejects_nested_duplicate_keys() {
        let result: Result<ExtraValue, _> = serde_json::from_str(r#"[{"a": 1, "a": 2}]"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("duplicate key `a`"));
    }

    #[test]
    fn test_extra_value_display() {
        let value = ExtraValue::from(vec![
            ExtraValue::from(1),
            ExtraValue::from("two \"quoted\""),
            ExtraValue::Null,
        ]);
        assert_eq!(value.to_string(), r#"[1,"two \"quoted\"",null]"#);
        assert_eq!(ExtraValue::from(f64::NAN).to_string(), "null");
    }
}
