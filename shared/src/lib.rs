use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Error body returned by the API: field name (or `non_field_errors` /
/// `detail`) mapped to the messages reported for it.
pub type ErrorResponse = BTreeMap<String, Vec<String>>;

/// Key used for errors that concern the record as a whole
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Key used for errors that are not tied to the submitted fields
pub const DETAIL: &str = "detail";

/// Serde helper that keeps "field omitted" apart from "field set to null".
///
/// Use together with `#[serde(default)]`: an omitted field stays `None`,
/// an explicit `null` becomes `Some(None)`, and a value becomes `Some(Some(v))`.
pub mod nullable {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

/// Represents a child enrolled in the daycare
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Child {
    pub id: i64,
    pub name: String,
    /// "male" or "female"
    pub gender: String,
    pub birthday: String, // ISO 8601 date format (YYYY-MM-DD)
    pub photo: Option<String>,
    pub grade: Option<i16>,
    pub is_study: bool,
}

/// Request body for creating, replacing or patching a child.
///
/// Fields are kept as raw JSON values so that a missing field or a value of
/// the wrong type is reported against that field alone instead of failing
/// the whole body. `photo` and `grade` tell an omitted key apart from `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChildRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    /// "male" or "female"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Value>,
    /// ISO 8601 date (YYYY-MM-DD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<Value>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub photo: Option<Option<Value>>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub grade: Option<Option<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_study: Option<Value>,
}

/// Response after creating or updating a child
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChildResponse {
    pub child: Child,
    pub success_message: String,
}

/// Response containing a list of children
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChildListResponse {
    pub children: Vec<Child>,
}

/// A single arrival/departure record for a child
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JournalEntry {
    pub id: i64,
    pub child_id: i64,
    /// RFC 3339 timestamp of the arrival
    pub income_time: Option<String>,
    /// "father" or "mother"
    pub income_escort: Option<String>,
    /// RFC 3339 timestamp of the departure
    pub outcome_time: Option<String>,
    pub outcome_escort: Option<String>,
}

/// Request body for creating, replacing or patching a journal entry.
///
/// As with [`ChildRequest`], values stay raw JSON until the server checks
/// them. For the four income/outcome fields an omitted key keeps the stored
/// value while an explicit `null` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct JournalEntryRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_id: Option<Value>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub income_time: Option<Option<Value>>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub income_escort: Option<Option<Value>>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub outcome_time: Option<Option<Value>>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub outcome_escort: Option<Option<Value>>,
}

/// Response after creating or updating a journal entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JournalEntryResponse {
    pub entry: JournalEntry,
    pub success_message: String,
}

/// Response containing a list of journal entries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JournalEntryListResponse {
    pub entries: Vec<JournalEntry>,
}
