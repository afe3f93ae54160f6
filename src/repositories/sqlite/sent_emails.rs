use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row};

use super::{parse_ts, SqliteStore};
use crate::{models::sent_email_model::SentEmail, repositories::SentEmailRepository};

fn sent_email_from_row(row: &SqliteRow) -> Result<SentEmail> {
    Ok(SentEmail {
        id: row.try_get("id")?,
        campaign_id: row.try_get("campaign_id")?,
        contact_id: row.try_get("contact_id")?,
        recipient: row.try_get("recipient")?,
        status: row.try_get::<String, _>("status")?.parse()?,
        error_message: row.try_get("error_message")?,
        created_at: parse_ts(&row.try_get::<String, _>("created_at")?)?,
        updated_at: parse_ts(&row.try_get::<String, _>("updated_at")?)?,
    })
}

#[async_trait]
impl SentEmailRepository for SqliteStore {
    async fn save(&self, sent_email: &SentEmail) -> Result<SentEmail> {
        sqlx::query(
            r#"
            INSERT INTO sent_emails (
                id, campaign_id, contact_id, recipient, status,
                error_message, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT (id) DO UPDATE SET
                status = excluded.status,
                error_message = excluded.error_message,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&sent_email.id)
        .bind(&sent_email.campaign_id)
        .bind(sent_email.contact_id)
        .bind(&sent_email.recipient)
        .bind(sent_email.status.as_str())
        .bind(&sent_email.error_message)
        .bind(sent_email.created_at.to_rfc3339())
        .bind(sent_email.updated_at.to_rfc3339())
        .execute(&self.db_pool)
        .await
        .context("Fallo al guardar sent_email")?;

        Ok(sent_email.clone())
    }

    async fn find_by_campaign(&self, campaign_id: &str) -> Result<Vec<SentEmail>> {
        let rows = sqlx::query(
            r#"
            SELECT id, campaign_id, contact_id, recipient, status,
                   error_message, created_at, updated_at
            FROM sent_emails
            WHERE campaign_id = ?1
            ORDER BY contact_id
            "#,
        )
        .bind(campaign_id)
        .fetch_all(&self.db_pool)
        .await
        .context("Fallo al listar sent_emails")?;

        rows.iter().map(sent_email_from_row).collect()
    }
}
