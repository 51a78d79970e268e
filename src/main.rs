use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use sqlx::{Pool, Sqlite};

use crate::config::app_config::AppConfig;
use crate::config::projudi_config::ProjudiConfig;
use crate::logger::init_logger;
use crate::services::consulta_service::ConsultaService;
use crate::services::processo_service::ProcessoService;
use crate::services::projudi_service::ProjudiService;
use crate::services::sync_service::SyncService;

mod app;
mod config;
mod handlers;
mod logger;
mod models;
mod services;

#[cfg(test)]
mod tests;

async fn setup_database(app_config: &AppConfig) -> Pool<Sqlite> {
    // 1) Criar a pasta do arquivo, se houver
    if let Some(parent) = std::path::Path::new(&app_config.database_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).expect("Não foi possível criar a pasta do banco");
        }
    }

    let db_url = app_config.database_url();
    log::info!("Conectando ao SQLite em {}", db_url);

    // 2) Conectar com SQLx
    Pool::<Sqlite>::connect(&db_url)
        .await
        .expect("Não foi possível conectar ao banco SQLite.")
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok(); // Carregar .env no início
    init_logger();

    let app_config = AppConfig::from_env();
    let projudi_config = ProjudiConfig::from_env();
    log::info!("PROJUDI em {}", projudi_config.endpoint);

    let projudi_service =
        ProjudiService::new(projudi_config).expect("Não foi possível inicializar ProjudiService");

    // Conectar ao banco
    let db_pool = setup_database(&app_config).await;

    // ConsultaService (roda as migrações de todas as tabelas)
    let consulta_service = ConsultaService::new(db_pool.clone());
    if let Err(e) = consulta_service.run_migrations().await {
        panic!("Falha nas migrações: {:?}", e);
    }

    let processo_service = ProcessoService::new(db_pool.clone());

    let sync_service = SyncService::new(
        projudi_service.clone(),
        consulta_service.clone(),
        processo_service.clone(),
    );

    // Subir servidor
    log::info!(
        "Subindo servidor em {}:{}",
        app_config.host,
        app_config.port
    );
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(projudi_service.clone()))
            .app_data(web::Data::new(consulta_service.clone()))
            .app_data(web::Data::new(processo_service.clone()))
            .app_data(web::Data::new(sync_service.clone()))
            .configure(app::init_app)
    })
    .workers(app_config.workers)
    .bind((app_config.host.as_str(), app_config.port))?
    .run()
    .await
}
