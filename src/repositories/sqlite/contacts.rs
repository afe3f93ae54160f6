use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row};

use super::{now, parse_ts, SqliteStore};
use crate::{models::contact_model::Contact, repositories::ContactRepository};

pub(super) fn contact_from_row(row: &SqliteRow) -> Result<Contact> {
    Ok(Contact {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        name: row.try_get("name")?,
        created_at: parse_ts(&row.try_get::<String, _>("created_at")?)?,
        updated_at: parse_ts(&row.try_get::<String, _>("updated_at")?)?,
    })
}

#[async_trait]
impl ContactRepository for SqliteStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Contact>> {
        let row = sqlx::query(
            "SELECT id, email, name, created_at, updated_at FROM contacts WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await
        .context("Fallo al buscar contacto por id")?;

        row.as_ref().map(contact_from_row).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Contact>> {
        let row = sqlx::query(
            "SELECT id, email, name, created_at, updated_at FROM contacts WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(&self.db_pool)
        .await
        .context("Fallo al buscar contacto por email")?;

        row.as_ref().map(contact_from_row).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Contact>> {
        let rows = sqlx::query(
            "SELECT id, email, name, created_at, updated_at FROM contacts ORDER BY id",
        )
        .fetch_all(&self.db_pool)
        .await
        .context("Fallo al listar contactos")?;

        rows.iter().map(contact_from_row).collect()
    }

    async fn create(&self, email: &str, name: &str) -> Result<Contact> {
        let ts = now();
        let id = sqlx::query(
            r#"
            INSERT INTO contacts (email, name, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?3)
            "#,
        )
        .bind(email)
        .bind(name)
        .bind(&ts)
        .execute(&self.db_pool)
        .await
        .context("Fallo al insertar contacto")?
        .last_insert_rowid();

        let ts = parse_ts(&ts)?;
        Ok(Contact {
            id,
            email: email.to_string(),
            name: name.to_string(),
            created_at: ts,
            updated_at: ts,
        })
    }

    async fn update(&self, contact: &Contact) -> Result<Contact> {
        sqlx::query(
            r#"
            UPDATE contacts
            SET email = ?2,
                name = ?3,
                updated_at = ?4
            WHERE id = ?1
            "#,
        )
        .bind(contact.id)
        .bind(&contact.email)
        .bind(&contact.name)
        .bind(contact.updated_at.to_rfc3339())
        .execute(&self.db_pool)
        .await
        .context("Fallo al actualizar contacto")?;

        Ok(contact.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = ?1")
            .bind(id)
            .execute(&self.db_pool)
            .await
            .context("Fallo al borrar contacto")?;

        Ok(result.rows_affected() > 0)
    }
}
