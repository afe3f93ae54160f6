//! repositories/sqlite/mod.rs
//! Implementación de los repositorios sobre SQLite con SQLx.

mod campaigns;
mod contacts;
mod segments;
mod sent_emails;
mod templates;
mod users;

use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};

#[derive(Clone, Debug)]
pub struct SqliteStore {
    db_pool: Pool<Sqlite>,
}

impl SqliteStore {
    pub fn new(db_pool: Pool<Sqlite>) -> Self {
        SqliteStore { db_pool }
    }

    /// Abre (o crea) la base de datos indicada por `database_url`.
    /// Una base en memoria usa una sola conexión: cada conexión extra
    /// abriría su propia base vacía, sin migraciones.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let max_connections = pool_size(database_url, max_connections);
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("DATABASE_URL inválida: {database_url}"))?
            .create_if_missing(true)
            .foreign_keys(true);

        let db_pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .with_context(|| format!("No se pudo conectar a {database_url}"))?;

        Ok(Self::new(db_pool))
    }

    /// Ejecuta migraciones de la base de datos
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.db_pool)
            .await
            .context("Failed to run migrations")?;
        Ok(())
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

fn pool_size(database_url: &str, requested: u32) -> u32 {
    if is_in_memory(database_url) {
        1
    } else {
        requested.max(1)
    }
}

fn now() -> String {
    Utc::now().to_rfc3339()
}

fn parse_ts(value: &str) -> Result<DateTime<Utc>> {
    value
        .parse()
        .with_context(|| format!("Timestamp inválido en DB: {value}"))
}
