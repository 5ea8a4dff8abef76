//! Journal entry domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The parent accompanying a child at arrival or departure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Escort {
    Father,
    Mother,
}

impl Escort {
    /// Numeric code used in storage
    pub fn code(&self) -> i16 {
        match self {
            Escort::Father => 0,
            Escort::Mother => 1,
        }
    }

    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            0 => Some(Escort::Father),
            1 => Some(Escort::Mother),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Escort::Father => "father",
            Escort::Mother => "mother",
        }
    }
}

impl fmt::Display for Escort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Escort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "father" => Ok(Escort::Father),
            "mother" => Ok(Escort::Mother),
            other => Err(format!("\"{}\" is not a valid choice.", other)),
        }
    }
}

/// The persistable field set of a journal entry, without its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntryFields {
    pub child_id: i64,
    pub income_time: Option<DateTime<Utc>>,
    pub income_escort: Option<Escort>,
    pub outcome_time: Option<DateTime<Utc>>,
    pub outcome_escort: Option<Escort>,
}

impl JournalEntryFields {
    /// A record with no arrival or departure yet
    pub fn empty(child_id: i64) -> Self {
        Self {
            child_id,
            income_time: None,
            income_escort: None,
            outcome_time: None,
            outcome_escort: None,
        }
    }

    /// Overlay `changes` on top of these fields
    pub fn merge(&self, changes: &JournalEntryChanges) -> Self {
        Self {
            child_id: changes.child_id.unwrap_or(self.child_id),
            income_time: changes.income_time.unwrap_or(self.income_time),
            income_escort: changes.income_escort.unwrap_or(self.income_escort),
            outcome_time: changes.outcome_time.unwrap_or(self.outcome_time),
            outcome_escort: changes.outcome_escort.unwrap_or(self.outcome_escort),
        }
    }
}

/// Proposed changes to a journal entry. `None` leaves a field as it is,
/// `Some(None)` clears it and `Some(Some(v))` sets it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JournalEntryChanges {
    pub child_id: Option<i64>,
    pub income_time: Option<Option<DateTime<Utc>>>,
    pub income_escort: Option<Option<Escort>>,
    pub outcome_time: Option<Option<DateTime<Utc>>>,
    pub outcome_escort: Option<Option<Escort>>,
}

/// A stored journal entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: i64,
    #[serde(flatten)]
    pub fields: JournalEntryFields,
}
