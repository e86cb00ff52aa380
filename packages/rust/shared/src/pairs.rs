//! Ordered key/value pair-list encoding for map-like registries.
//!
//! Registries cross the task boundary as `[[key, value], ...]` so that the
//! receiver can rebuild them in insertion order. Use with
//! `#[serde(with = "crate::pairs")]` on an `IndexMap` field.

use std::hash::Hash;

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serialize a map as an ordered sequence of `[key, value]` pairs.
pub fn serialize<K, V, S>(map: &IndexMap<K, V>, serializer: S) -> Result<S::Ok, S::Error>
where
    K: Serialize,
    V: Serialize,
    S: Serializer,
{
    serializer.collect_seq(map.iter())
}

/// Rebuild a map from an ordered sequence of `[key, value]` pairs.
///
/// Duplicate keys are rejected.
pub fn deserialize<'de, K, V, D>(deserializer: D) -> Result<IndexMap<K, V>, D::Error>
where
    K: Deserialize<'de> + Eq + Hash,
    V: Deserialize<'de>,
    D: Deserializer<'de>,
{
    let pairs = Vec::<(K, V)>::deserialize(deserializer)?;
    let mut map = IndexMap::with_capacity(pairs.len());

    for (index, (key, value)) in pairs.into_iter().enumerate() {
        if map.insert(key, value).is_some() {
            return Err(D::Error::custom(format!(
                "duplicate key at pair index {index}"
            )));
        }
    }

    Ok(map)
}
