//! Dictionary-style access shared by the record types.
//!
//! Both [`UnifiedAnalysisResult`](crate::UnifiedAnalysisResult) and
//! [`ChunkInfo`](crate::ChunkInfo) expose their fields three ways:
//!
//! - as plain struct fields (`result.document_type`),
//! - by key, failing on unknown keys ([`Record::require`]),
//! - by key with a fallback ([`Record::get`], [`Record::get_or`],
//!   [`Record::contains_key`]).
//!
//! Every key-based read goes through [`Record::field`] and then the
//! record's open maps, and [`Record::to_mapping`] is built from the same
//! function, so the access modes cannot disagree.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::RecordError;
use crate::models::Metadata;

/// A contract record with a fixed set of declared fields.
pub trait Record: Serialize + DeserializeOwned + Sized {
    /// Type name used in error messages.
    const RECORD_NAME: &'static str;

    /// Declared field names, in declaration order.
    const FIELDS: &'static [&'static str];

    /// Value of a declared field, or `None` if `name` is not declared.
    ///
    /// Optional fields that are unset read as `Value::Null`.
    fn field(&self, name: &str) -> Option<Value>;

    /// Open mappings whose keys are reachable through [`get`](Record::get),
    /// searched in order after the declared fields.
    fn extra_maps(&self) -> Vec<&Metadata>;

    /// Value for `key`: a declared field, else the first open map holding it.
    fn get(&self, key: &str) -> Option<Value> {
        self.field(key).or_else(|| {
            self.extra_maps()
                .into_iter()
                .find_map(|map| map.get(key).cloned())
        })
    }

    fn get_or(&self, key: &str, default: Value) -> Value {
        self.get(key).unwrap_or(default)
    }

    /// Key-style lookup. Unknown keys are an error.
    fn require(&self, key: &str) -> Result<Value, RecordError> {
        self.get(key).ok_or_else(|| RecordError::MissingKey {
            key: key.to_string(),
            record: Self::RECORD_NAME,
        })
    }

    fn contains_key(&self, key: &str) -> bool {
        Self::FIELDS.contains(&key) || self.extra_maps().iter().any(|m| m.contains_key(key))
    }

    fn keys(&self) -> &'static [&'static str] {
        Self::FIELDS
    }

    fn values(&self) -> Vec<Value> {
        self.items().into_iter().map(|(_, v)| v).collect()
    }

    fn items(&self) -> Vec<(&'static str, Value)> {
        Self::FIELDS
            .iter()
            .filter_map(|name| self.field(name).map(|v| (*name, v)))
            .collect()
    }

    /// Generic string-keyed mapping with every declared field.
    fn to_mapping(&self) -> Map<String, Value> {
        self.items()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    /// Rebuild a record from [`to_mapping`](Record::to_mapping) output.
    ///
    /// Missing optional fields take their defaults. Missing required
    /// fields and unknown top-level keys are rejected.
    fn from_mapping(map: Map<String, Value>) -> Result<Self, RecordError> {
        serde_json::from_value(Value::Object(map)).map_err(|source| RecordError::Invalid {
            record: Self::RECORD_NAME,
            source,
        })
    }

    fn to_json_string(&self) -> String {
        Value::Object(self.to_mapping()).to_string()
    }

    fn from_json_str(s: &str) -> Result<Self, RecordError> {
        serde_json::from_str(s).map_err(|source| RecordError::Invalid {
            record: Self::RECORD_NAME,
            source,
        })
    }
}
