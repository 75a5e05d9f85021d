use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A JSON number.
///
/// Integers that fit in `i64` are always stored as signed so that
/// `Number::from(5u64) == Number::from(5i64)`. Floats keep their own variant:
/// `1.0` and `1` are different values, as they are in the stored text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Number(Repr);

#[derive(Debug, Clone, Copy, PartialEq)]
enum Repr {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Number {
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self.0 {
            Repr::Int(v) => Some(v),
            Repr::UInt(_) | Repr::Float(_) => None,
        }
    }

    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self.0 {
            Repr::Int(v) => u64::try_from(v).ok(),
            Repr::UInt(v) => Some(v),
            Repr::Float(_) => None,
        }
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> f64 {
        match self.0 {
            Repr::Int(v) => v as f64,
            Repr::UInt(v) => v as f64,
            Repr::Float(v) => v,
        }
    }

    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self.0, Repr::Float(_))
    }

    /// `NaN` and the infinities have no JSON representation.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        match self.0 {
            Repr::Int(_) | Repr::UInt(_) => true,
            Repr::Float(v) => v.is_finite(),
        }
    }
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Self(Repr::Int(v))
    }
}

impl From<u64> for Number {
    fn from(v: u64) -> Self {
        i64::try_from(v).map_or(Self(Repr::UInt(v)), |i| Self(Repr::Int(i)))
    }
}

impl From<i32> for Number {
    fn from(v: i32) -> Self {
        Self(Repr::Int(i64::from(v)))
    }
}

impl From<u32> for Number {
    fn from(v: u32) -> Self {
        Self(Repr::Int(i64::from(v)))
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Self(Repr::Float(v))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Repr::Int(v) => write!(f, "{v}"),
            Repr::UInt(v) => write!(f, "{v}"),
            Repr::Float(v) => write!(f, "{v:?}"),
        }
    }
}

impl Serialize for Number {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0 {
            Repr::Int(v) => serializer.serialize_i64(v),
            Repr::UInt(v) => serializer.serialize_u64(v),
            // serde_json would silently write `null` for these.
            Repr::Float(v) if !v.is_finite() => Err(serde::ser::Error::custom(format!(
                "non-finite number {v} cannot be represented"
            ))),
            Repr::Float(v) => serializer.serialize_f64(v),
        }
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NumberVisitor;

        impl Visitor<'_> for NumberVisitor {
            type Value = Number;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a JSON number")
            }

            fn visit_i64<E>(self, value: i64) -> Result<Number, E>
            where
                E: de::Error,
            {
                Ok(Number::from(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Number, E>
            where
                E: de::Error,
            {
                Ok(Number::from(value))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Number, E>
            where
                E: de::Error,
            {
                Ok(Number::from(value))
            }
        }

        deserializer.deserialize_any(NumberVisitor)
    }
}
