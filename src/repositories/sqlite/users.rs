use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row};

use super::{now, parse_ts, SqliteStore};
use crate::{models::user_model::User, repositories::UserRepository};

fn user_from_row(row: &SqliteRow) -> Result<User> {
    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        created_at: parse_ts(&row.try_get::<String, _>("created_at")?)?,
    })
}

#[async_trait]
impl UserRepository for SqliteStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT id, username, created_at FROM users WHERE username = ?1")
            .bind(username)
            .fetch_optional(&self.db_pool)
            .await
            .context("Fallo al buscar usuario")?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn create(&self, username: &str) -> Result<User> {
        let created_at = now();
        let id = sqlx::query("INSERT INTO users (username, created_at) VALUES (?1, ?2)")
            .bind(username)
            .bind(&created_at)
            .execute(&self.db_pool)
            .await
            .context("Fallo al insertar usuario")?
            .last_insert_rowid();

        Ok(User {
            id,
            username: username.to_string(),
            created_at: parse_ts(&created_at)?,
        })
    }
}
