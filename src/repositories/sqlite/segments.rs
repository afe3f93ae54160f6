use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row, Sqlite, Transaction};

use super::{contacts::contact_from_row, now, parse_ts, SqliteStore};
use crate::{
    models::{contact_model::Contact, segment_model::Segment},
    repositories::SegmentRepository,
};

impl SqliteStore {
    /// Miembros actuales del segmento, ordenados por id
    pub(super) async fn segment_members(&self, segment_id: i64) -> Result<Vec<Contact>> {
        let rows = sqlx::query(
            r#"
            SELECT c.id, c.email, c.name, c.created_at, c.updated_at
            FROM contacts c
            JOIN segments_contacts sc ON sc.contact_id = c.id
            WHERE sc.segment_id = ?1
            ORDER BY c.id
            "#,
        )
        .bind(segment_id)
        .fetch_all(&self.db_pool)
        .await
        .context("Fallo al leer miembros del segmento")?;

        rows.iter().map(contact_from_row).collect()
    }

    pub(super) async fn segment_from_row(&self, row: &SqliteRow) -> Result<Segment> {
        let id: i64 = row.try_get("id")?;
        Ok(Segment {
            id,
            name: row.try_get("name")?,
            user_id: row.try_get("user_id")?,
            contacts: self.segment_members(id).await?,
            created_at: parse_ts(&row.try_get::<String, _>("created_at")?)?,
            updated_at: parse_ts(&row.try_get::<String, _>("updated_at")?)?,
        })
    }
}

async fn insert_members(
    tx: &mut Transaction<'_, Sqlite>,
    segment_id: i64,
    contact_ids: &[i64],
) -> Result<()> {
    for contact_id in contact_ids {
        sqlx::query(
            "INSERT OR IGNORE INTO segments_contacts (segment_id, contact_id) VALUES (?1, ?2)",
        )
        .bind(segment_id)
        .bind(contact_id)
        .execute(&mut **tx)
        .await
        .context("Fallo al asociar contacto al segmento")?;
    }
    Ok(())
}

#[async_trait]
impl SegmentRepository for SqliteStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Segment>> {
        let row = sqlx::query(
            "SELECT id, name, user_id, created_at, updated_at FROM segments WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await
        .context("Fallo al buscar segmento")?;

        match row {
            Some(row) => Ok(Some(self.segment_from_row(&row).await?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> Result<Vec<Segment>> {
        let rows = sqlx::query(
            "SELECT id, name, user_id, created_at, updated_at FROM segments ORDER BY id",
        )
        .fetch_all(&self.db_pool)
        .await
        .context("Fallo al listar segmentos")?;

        let mut result = Vec::with_capacity(rows.len());
        for row in &rows {
            result.push(self.segment_from_row(row).await?);
        }
        Ok(result)
    }

    async fn create(&self, name: &str, user_id: i64, contact_ids: &[i64]) -> Result<Segment> {
        let ts = now();
        let mut tx = self.db_pool.begin().await?;

        let id = sqlx::query(
            r#"
            INSERT INTO segments (name, user_id, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?3)
            "#,
        )
        .bind(name)
        .bind(user_id)
        .bind(&ts)
        .execute(&mut *tx)
        .await
        .context("Fallo al insertar segmento")?
        .last_insert_rowid();

        insert_members(&mut tx, id, contact_ids).await?;
        tx.commit().await.context("Fallo al confirmar segmento")?;

        let ts = parse_ts(&ts)?;
        Ok(Segment {
            id,
            name: name.to_string(),
            user_id,
            contacts: self.segment_members(id).await?,
            created_at: ts,
            updated_at: ts,
        })
    }

    async fn update(&self, segment: &Segment) -> Result<Segment> {
        let mut tx = self.db_pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE segments
            SET name = ?2,
                user_id = ?3,
                updated_at = ?4
            WHERE id = ?1
            "#,
        )
        .bind(segment.id)
        .bind(&segment.name)
        .bind(segment.user_id)
        .bind(segment.updated_at.to_rfc3339())
        .execute(&mut *tx)
        .await
        .context("Fallo al actualizar segmento")?;

        sqlx::query("DELETE FROM segments_contacts WHERE segment_id = ?1")
            .bind(segment.id)
            .execute(&mut *tx)
            .await
            .context("Fallo al limpiar miembros del segmento")?;

        insert_members(&mut tx, segment.id, &segment.contact_ids()).await?;
        tx.commit().await.context("Fallo al confirmar segmento")?;

        Ok(Segment {
            contacts: self.segment_members(segment.id).await?,
            ..segment.clone()
        })
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM segments WHERE id = ?1")
            .bind(id)
            .execute(&self.db_pool)
            .await
            .context("Fallo al borrar segmento")?;

        Ok(result.rows_affected() > 0)
    }
}
