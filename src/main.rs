use actix_web::{App, HttpServer};
use anyhow::{Context, Result};
use dotenv::dotenv;

use crate::app::AppServices;
use crate::config::app_config::AppConfig;
use crate::logger::init_logger;
use crate::repositories::sqlite::SqliteStore;

mod app;
mod config;
mod errors;
mod handlers;
mod logger;
mod models;
mod providers;
mod repositories;
mod services;

#[cfg(test)]
mod tests;

async fn setup_database(database_url: &str) -> Result<SqliteStore> {
    // Crear carpeta "data" para la ruta por defecto
    if let Some(path) = database_url.strip_prefix("sqlite:") {
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() && !path.starts_with(':') {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("No se pudo crear directorio {parent:?}"))?;
            }
        }
    }

    log::info!("Conectando a SQLite en {}", database_url);
    let store = SqliteStore::connect(database_url, 5).await?;
    store.run_migrations().await?;
    Ok(store)
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv().ok(); // Cargar .env al inicio
    init_logger();

    let config = AppConfig::from_env().context("Configuración inválida")?;
    let store = setup_database(&config.database_url).await?;
    let mail_sender = providers::build_sender(&config.mail)?;
    let services = AppServices::new(store, mail_sender, &config.mail.from);

    log::info!(
        "Levantando servidor en {}:{} (mail transport: {})",
        config.host,
        config.port,
        config.mail.transport.name()
    );
    HttpServer::new(move || {
        let services = services.clone();
        App::new()
            .configure(move |cfg| services.configure_data(cfg))
            .configure(app::init_app)
    })
    .workers(config.workers)
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
