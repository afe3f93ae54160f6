use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row};

use super::{contacts::contact_from_row, parse_ts, SqliteStore};
use crate::{models::campaign_model::Campaign, repositories::CampaignRepository};

impl SqliteStore {
    async fn campaign_from_row(&self, row: &SqliteRow) -> Result<Campaign> {
        let id: String = row.try_get("id")?;

        let contact_rows = sqlx::query(
            r#"
            SELECT c.id, c.email, c.name, c.created_at, c.updated_at
            FROM contacts c
            JOIN campaigns_contacts cc ON cc.contact_id = c.id
            WHERE cc.campaign_id = ?1
            ORDER BY c.id
            "#,
        )
        .bind(&id)
        .fetch_all(&self.db_pool)
        .await
        .context("Fallo al leer contactos de la campaña")?;
        let contacts = contact_rows
            .iter()
            .map(contact_from_row)
            .collect::<Result<Vec<_>>>()?;

        let segment_rows = sqlx::query(
            r#"
            SELECT s.id, s.name, s.user_id, s.created_at, s.updated_at
            FROM segments s
            JOIN campaigns_segments cs ON cs.segment_id = s.id
            WHERE cs.campaign_id = ?1
            ORDER BY s.id
            "#,
        )
        .bind(&id)
        .fetch_all(&self.db_pool)
        .await
        .context("Fallo al leer segmentos de la campaña")?;
        let mut segments = Vec::with_capacity(segment_rows.len());
        for row in &segment_rows {
            segments.push(self.segment_from_row(row).await?);
        }

        Ok(Campaign {
            id,
            name: row.try_get("name")?,
            template_id: row.try_get("template_id")?,
            contacts,
            segments,
            created_at: parse_ts(&row.try_get::<String, _>("created_at")?)?,
        })
    }
}

#[async_trait]
impl CampaignRepository for SqliteStore {
    async fn save(&self, campaign: &Campaign) -> Result<Campaign> {
        let mut tx = self.db_pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO campaigns (id, name, template_id, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&campaign.id)
        .bind(&campaign.name)
        .bind(campaign.template_id)
        .bind(campaign.created_at.to_rfc3339())
        .execute(&mut *tx)
        .await
        .context("Fallo al insertar campaña")?;

        for contact in &campaign.contacts {
            sqlx::query(
                "INSERT OR IGNORE INTO campaigns_contacts (campaign_id, contact_id) VALUES (?1, ?2)",
            )
            .bind(&campaign.id)
            .bind(contact.id)
            .execute(&mut *tx)
            .await
            .context("Fallo al asociar contacto a la campaña")?;
        }

        for segment in &campaign.segments {
            sqlx::query(
                "INSERT OR IGNORE INTO campaigns_segments (campaign_id, segment_id) VALUES (?1, ?2)",
            )
            .bind(&campaign.id)
            .bind(segment.id)
            .execute(&mut *tx)
            .await
            .context("Fallo al asociar segmento a la campaña")?;
        }

        tx.commit().await.context("Fallo al confirmar campaña")?;
        Ok(campaign.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Campaign>> {
        let row = sqlx::query("SELECT id, name, template_id, created_at FROM campaigns WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await
            .context("Fallo al buscar campaña")?;

        match row {
            Some(row) => Ok(Some(self.campaign_from_row(&row).await?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> Result<Vec<Campaign>> {
        let rows = sqlx::query(
            "SELECT id, name, template_id, created_at FROM campaigns ORDER BY created_at DESC",
        )
        .fetch_all(&self.db_pool)
        .await
        .context("Fallo al listar campañas")?;

        let mut result = Vec::with_capacity(rows.len());
        for row in &rows {
            result.push(self.campaign_from_row(row).await?);
        }
        Ok(result)
    }

    async fn count_by_template(&self, template_id: i64) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS cnt FROM campaigns WHERE template_id = ?1")
            .bind(template_id)
            .fetch_one(&self.db_pool)
            .await
            .context("Fallo al contar campañas por template")?;
        Ok(row.try_get("cnt")?)
    }

    async fn count_by_contact(&self, contact_id: i64) -> Result<i64> {
        let row =
            sqlx::query("SELECT COUNT(*) AS cnt FROM campaigns_contacts WHERE contact_id = ?1")
                .bind(contact_id)
                .fetch_one(&self.db_pool)
                .await
                .context("Fallo al contar campañas por contacto")?;
        Ok(row.try_get("cnt")?)
    }

    async fn count_by_segment(&self, segment_id: i64) -> Result<i64> {
        let row =
            sqlx::query("SELECT COUNT(*) AS cnt FROM campaigns_segments WHERE segment_id = ?1")
                .bind(segment_id)
                .fetch_one(&self.db_pool)
                .await
                .context("Fallo al contar campañas por segmento")?;
        Ok(row.try_get("cnt")?)
    }
}
