use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::{Escort, JournalEntry, JournalEntryFields};
use crate::storage::connection::DbConnection;
use crate::storage::traits::JournalStorage;

/// Repository for journal entry operations
#[derive(Clone)]
pub struct JournalRepository {
    db: DbConnection,
}

impl JournalRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_entry(row: &SqliteRow) -> Result<JournalEntry> {
        Ok(JournalEntry {
            id: row.try_get("id")?,
            fields: JournalEntryFields {
                child_id: row.try_get("child_id")?,
                income_time: decode_time(row.try_get("income_time")?)?,
                income_escort: decode_escort(row.try_get("income_escort")?)?,
                outcome_time: decode_time(row.try_get("outcome_time")?)?,
                outcome_escort: decode_escort(row.try_get("outcome_escort")?)?,
            },
        })
    }
}

fn encode_time(time: Option<DateTime<Utc>>) -> Option<String> {
    time.map(|t| t.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

fn decode_time(value: Option<String>) -> Result<Option<DateTime<Utc>>> {
    value
        .map(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map(|t| t.with_timezone(&Utc))
                .with_context(|| format!("Stored timestamp is invalid: {}", s))
        })
        .transpose()
}

fn decode_escort(code: Option<i16>) -> Result<Option<Escort>> {
    code.map(|c| Escort::from_code(c).ok_or_else(|| anyhow::anyhow!("Stored escort code is invalid: {}", c)))
        .transpose()
}

#[async_trait]
impl JournalStorage for JournalRepository {
    async fn store_entry(&self, fields: &JournalEntryFields) -> Result<JournalEntry> {
        let result = sqlx::query(
            r#"
            INSERT INTO journal_entries (child_id, income_time, income_escort, outcome_time, outcome_escort)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(fields.child_id)
        .bind(encode_time(fields.income_time))
        .bind(fields.income_escort.map(|e| e.code()))
        .bind(encode_time(fields.outcome_time))
        .bind(fields.outcome_escort.map(|e| e.code()))
        .execute(self.db.pool())
        .await?;

        Ok(JournalEntry {
            id: result.last_insert_rowid(),
            fields: fields.clone(),
        })
    }

    async fn get_entry(&self, entry_id: i64) -> Result<Option<JournalEntry>> {
        let row = sqlx::query(
            r#"
            SELECT id, child_id, income_time, income_escort, outcome_time, outcome_escort
            FROM journal_entries
            WHERE id = ?
            "#,
        )
        .bind(entry_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_entry).transpose()
    }

    async fn list_entries(&self) -> Result<Vec<JournalEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, child_id, income_time, income_escort, outcome_time, outcome_escort
            FROM journal_entries
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_entry).collect()
    }

    async fn list_study_entries(&self) -> Result<Vec<JournalEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT j.id, j.child_id, j.income_time, j.income_escort, j.outcome_time, j.outcome_escort
            FROM journal_entries j
            INNER JOIN children c ON c.id = j.child_id
            WHERE c.is_study = 1
            ORDER BY j.id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_entry).collect()
    }

    async fn update_entry(&self, entry: &JournalEntry) -> Result<bool> {
        let fields = &entry.fields;
        let result = sqlx::query(
            r#"
            UPDATE journal_entries
            SET child_id = ?, income_time = ?, income_escort = ?, outcome_time = ?, outcome_escort = ?
            WHERE id = ?
            "#,
        )
        .bind(fields.child_id)
        .bind(encode_time(fields.income_time))
        .bind(fields.income_escort.map(|e| e.code()))
        .bind(encode_time(fields.outcome_time))
        .bind(fields.outcome_escort.map(|e| e.code()))
        .bind(entry.id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_entry(&self, entry_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM journal_entries WHERE id = ?")
            .bind(entry_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
