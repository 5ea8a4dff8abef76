use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::{Child, Gender, NewChild};
use crate::storage::connection::DbConnection;
use crate::storage::traits::ChildStorage;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Repository for child operations
#[derive(Clone)]
pub struct ChildRepository {
    db: DbConnection,
}

impl ChildRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_child(row: &SqliteRow) -> Result<Child> {
        let gender: String = row.try_get("gender")?;
        let birthday: String = row.try_get("birthday")?;

        Ok(Child {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            gender: gender
                .parse::<Gender>()
                .map_err(|e| anyhow::anyhow!("Stored gender is invalid: {}", e))?,
            birthday: NaiveDate::parse_from_str(&birthday, DATE_FORMAT)
                .with_context(|| format!("Stored birthday is invalid: {}", birthday))?,
            photo: row.try_get("photo")?,
            grade: row.try_get("grade")?,
            is_study: row.try_get("is_study")?,
        })
    }
}

#[async_trait]
impl ChildStorage for ChildRepository {
    async fn store_child(&self, child: &NewChild) -> Result<Child> {
        let result = sqlx::query(
            r#"
            INSERT INTO children (name, gender, birthday, photo, grade, is_study)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&child.name)
        .bind(child.gender.as_str())
        .bind(child.birthday.format(DATE_FORMAT).to_string())
        .bind(&child.photo)
        .bind(child.grade)
        .bind(child.is_study)
        .execute(self.db.pool())
        .await?;

        Ok(Child::from_new(result.last_insert_rowid(), child.clone()))
    }

    async fn get_child(&self, child_id: i64) -> Result<Option<Child>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, gender, birthday, photo, grade, is_study
            FROM children
            WHERE id = ?
            "#,
        )
        .bind(child_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_child).transpose()
    }

    async fn list_children(&self) -> Result<Vec<Child>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, gender, birthday, photo, grade, is_study
            FROM children
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_child).collect()
    }

    async fn update_child(&self, child: &Child) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE children
            SET name = ?, gender = ?, birthday = ?, photo = ?, grade = ?, is_study = ?
            WHERE id = ?
            "#,
        )
        .bind(&child.name)
        .bind(child.gender.as_str())
        .bind(child.birthday.format(DATE_FORMAT).to_string())
        .bind(&child.photo)
        .bind(child.grade)
        .bind(child.is_study)
        .bind(child.id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_child(&self, child_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM children WHERE id = ?")
            .bind(child_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
