use std::collections::BTreeMap;
use std::collections::btree_map::{self, Entry};
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CodecError;
use crate::value::ExtraValue;

/// Free-form metadata attached to a chat message, channel or user.
///
/// Keys are unique and kept sorted, so two equal mappings always serialize to
/// the same text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtraData(BTreeMap<String, ExtraValue>);

impl ExtraData {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ExtraValue> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ExtraValue> {
        self.0.get_mut(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the previous value for `key`, if any.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ExtraValue>,
    ) -> Option<ExtraValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<ExtraValue> {
        self.0.remove(key)
    }

    #[must_use]
    pub fn iter(&self) -> btree_map::Iter<'_, String, ExtraValue> {
        self.0.iter()
    }

    #[must_use]
    pub fn keys(&self) -> btree_map::Keys<'_, String, ExtraValue> {
        self.0.keys()
    }

    #[must_use]
    pub fn values(&self) -> btree_map::Values<'_, String, ExtraValue> {
        self.0.values()
    }

    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, ExtraValue> {
        self.0
    }

    /// Nesting depth, counting this mapping as level 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0
            .values()
            .map(ExtraValue::depth)
            .max()
            .unwrap_or(0)
            .saturating_add(1)
    }

    /// Whether the whole tree stays within `limit` levels.
    #[must_use]
    pub fn fits_depth(&self, limit: usize) -> bool {
        limit
            .checked_sub(1)
            .is_some_and(|rest| self.0.values().all(|value| value.fits_depth(rest)))
    }

    /// Collects map entries, refusing a key that was already seen.
    pub(crate) fn from_map_access<'de, A>(mut access: A) -> Result<Self, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = BTreeMap::new();
        while let Some((key, value)) = access.next_entry::<String, ExtraValue>()? {
            match entries.entry(key) {
                Entry::Occupied(occupied) => {
                    return Err(de::Error::custom(format!(
                        "duplicate key `{}`",
                        occupied.key()
                    )));
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(value);
                }
            }
        }
        Ok(Self(entries))
    }
}

impl From<BTreeMap<String, ExtraValue>> for ExtraData {
    fn from(map: BTreeMap<String, ExtraValue>) -> Self {
        Self(map)
    }
}

impl TryFrom<serde_json::Value> for ExtraData {
    type Error = CodecError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match ExtraValue::from(value) {
            ExtraValue::Object(map) => Ok(map),
            other => Err(CodecError::MalformedExtraData(format!(
                "expected a JSON object at the top level, found {}",
                other.kind()
            ))),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ExtraData
where
    K: Into<String>,
    V: Into<ExtraValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<K, V> Extend<(K, V)> for ExtraData
where
    K: Into<String>,
    V: Into<ExtraValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0.extend(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into())),
        );
    }
}

impl IntoIterator for ExtraData {
    type Item = (String, ExtraValue);
    type IntoIter = btree_map::IntoIter<String, ExtraValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ExtraData {
    type Item = (&'a String, &'a ExtraValue);
    type IntoIter = btree_map::Iter<'a, String, ExtraValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ExtraData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            let quoted = serde_json::to_string(key).map_err(|_| fmt::Error)?;
            write!(f, "{quoted}:{value}")?;
        }
        write!(f, "}}")
    }
}

impl Serialize for ExtraData {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ExtraData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ExtraDataVisitor;

        impl<'de> Visitor<'de> for ExtraDataVisitor {
            type Value = ExtraData;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a JSON object")
            }

            fn visit_map<A>(self, map: A) -> Result<ExtraData, A::Error>
            where
                A: MapAccess<'de>,
            {
                ExtraData::from_map_access(map)
            }
        }

        deserializer.deserialize_map(ExtraDataVisitor)
    }
}
