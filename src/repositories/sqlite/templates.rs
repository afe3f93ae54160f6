use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row};

use super::{now, parse_ts, SqliteStore};
use crate::{
    models::template_model::{Template, TemplateContent},
    repositories::{TemplateContentRepository, TemplateRepository},
};

fn template_from_row(row: &SqliteRow) -> Result<Template> {
    Ok(Template {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        favorite: row.try_get::<i64, _>("favorite")? != 0,
        user_id: row.try_get("user_id")?,
        created_at: parse_ts(&row.try_get::<String, _>("created_at")?)?,
        updated_at: parse_ts(&row.try_get::<String, _>("updated_at")?)?,
    })
}

fn content_from_row(row: &SqliteRow) -> Result<TemplateContent> {
    Ok(TemplateContent {
        id: row.try_get("id")?,
        template_id: row.try_get("template_id")?,
        about: row.try_get("about")?,
        content: row.try_get("content")?,
        created_at: parse_ts(&row.try_get::<String, _>("created_at")?)?,
    })
}

#[async_trait]
impl TemplateRepository for SqliteStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Template>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, favorite, user_id, created_at, updated_at
            FROM templates
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await
        .context("Fallo al buscar template")?;

        row.as_ref().map(template_from_row).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Template>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, favorite, user_id, created_at, updated_at
            FROM templates
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db_pool)
        .await
        .context("Fallo al listar templates")?;

        rows.iter().map(template_from_row).collect()
    }

    async fn create(&self, name: &str, favorite: bool, user_id: i64) -> Result<Template> {
        let ts = now();
        let id = sqlx::query(
            r#"
            INSERT INTO templates (name, favorite, user_id, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            "#,
        )
        .bind(name)
        .bind(favorite as i64)
        .bind(user_id)
        .bind(&ts)
        .execute(&self.db_pool)
        .await
        .context("Fallo al insertar template")?
        .last_insert_rowid();

        let ts = parse_ts(&ts)?;
        Ok(Template {
            id,
            name: name.to_string(),
            favorite,
            user_id,
            created_at: ts,
            updated_at: ts,
        })
    }

    async fn update(&self, template: &Template) -> Result<Template> {
        sqlx::query(
            r#"
            UPDATE templates
            SET name = ?2,
                favorite = ?3,
                user_id = ?4,
                updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(template.id)
        .bind(&template.name)
        .bind(template.favorite as i64)
        .bind(template.user_id)
        .bind(template.updated_at.to_rfc3339())
        .execute(&self.db_pool)
        .await
        .context("Fallo al actualizar template")?;

        Ok(template.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM templates WHERE id = ?1")
            .bind(id)
            .execute(&self.db_pool)
            .await
            .context("Fallo al borrar template")?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl TemplateContentRepository for SqliteStore {
    async fn find_latest(&self, template_id: i64) -> Result<Option<TemplateContent>> {
        // id es AUTOINCREMENT: el mayor es la versión más reciente
        let row = sqlx::query(
            r#"
            SELECT id, template_id, about, content, created_at
            FROM template_contents
            WHERE template_id = ?1
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .bind(template_id)
        .fetch_optional(&self.db_pool)
        .await
        .context("Fallo al buscar contenido del template")?;

        row.as_ref().map(content_from_row).transpose()
    }

    async fn create(
        &self,
        template_id: i64,
        about: &str,
        content: &str,
    ) -> Result<TemplateContent> {
        let ts = now();
        let id = sqlx::query(
            r#"
            INSERT INTO template_contents (template_id, about, content, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(template_id)
        .bind(about)
        .bind(content)
        .bind(&ts)
        .execute(&self.db_pool)
        .await
        .context("Fallo al insertar contenido del template")?
        .last_insert_rowid();

        Ok(TemplateContent {
            id,
            template_id,
            about: about.to_string(),
            content: content.to_string(),
            created_at: parse_ts(&ts)?,
        })
    }
}
