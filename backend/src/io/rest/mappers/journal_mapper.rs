use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use super::{integer_value, parse_nullable, parse_required, text_value, RequestMode};
use crate::domain::errors::FieldErrors;
use crate::domain::models::{Escort, JournalEntry as DomainEntry, JournalEntryChanges};
use shared::{
    JournalEntry as SharedEntry, JournalEntryListResponse, JournalEntryRequest,
    JournalEntryResponse,
};

const DATETIME_FORMAT_HINT: &str = "Datetime has wrong format. Use one of these formats instead: \
     YYYY-MM-DDThh:mm[:ss[.uuuuuu]][+HH:MM|-HH:MM|Z].";

/// Mapper to convert between shared journal DTOs and domain journal models.
pub struct JournalMapper;

impl JournalMapper {
    pub fn to_dto(domain: DomainEntry) -> SharedEntry {
        let fields = domain.fields;
        SharedEntry {
            id: domain.id,
            child_id: fields.child_id,
            income_time: fields.income_time.map(format_timestamp),
            income_escort: fields.income_escort.map(|e| e.as_str().to_string()),
            outcome_time: fields.outcome_time.map(format_timestamp),
            outcome_escort: fields.outcome_escort.map(|e| e.as_str().to_string()),
        }
    }

    pub fn to_entry_list_dto(entries: Vec<DomainEntry>) -> JournalEntryListResponse {
        JournalEntryListResponse {
            entries: entries.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_entry_response_dto(domain: DomainEntry, message: &str) -> JournalEntryResponse {
        JournalEntryResponse {
            entry: Self::to_dto(domain),
            success_message: message.to_string(),
        }
    }

    /// Validates the shape of a journal request.
    ///
    /// In `Full` mode `child_id` is required. Cross-field rules are left to
    /// the journal validator.
    pub fn to_changes(
        request: JournalEntryRequest,
        mode: RequestMode,
    ) -> Result<JournalEntryChanges, FieldErrors> {
        let mut errors = FieldErrors::new();

        let changes = JournalEntryChanges {
            child_id: parse_required(&mut errors, "child_id", request.child_id, mode, parse_child_id),
            income_time: parse_nullable(&mut errors, "income_time", request.income_time, parse_time_value),
            income_escort: parse_nullable(&mut errors, "income_escort", request.income_escort, parse_escort),
            outcome_time: parse_nullable(&mut errors, "outcome_time", request.outcome_time, parse_time_value),
            outcome_escort: parse_nullable(&mut errors, "outcome_escort", request.outcome_escort, parse_escort),
        };

        errors.into_result(changes)
    }
}

pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Accepts RFC 3339 as well as the space separated ISO 8601 form
/// (`2010-02-01 08:20:15+00:00`).
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%:z"))
        .map(|time| time.with_timezone(&Utc))
        .map_err(|_| DATETIME_FORMAT_HINT.to_string())
}

fn parse_time_value(value: &Value) -> Result<DateTime<Utc>, String> {
    value
        .as_str()
        .ok_or_else(|| DATETIME_FORMAT_HINT.to_string())
        .and_then(parse_timestamp)
}

fn parse_escort(value: &Value) -> Result<Escort, String> {
    text_value(value)?.parse()
}

fn parse_child_id(value: &Value) -> Result<i64, String> {
    integer_value(value).map_err(|_| {
        let received = match value {
            Value::String(_) => "str",
            Value::Bool(_) => "bool",
            Value::Number(_) => "float",
            Value::Array(_) => "list",
            _ => "dict",
        };
        format!("Incorrect type. Expected pk value, received {}.", received)
    })
}
