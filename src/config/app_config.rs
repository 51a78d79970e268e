//! config/app_config.rs
//! Configuração do servidor HTTP e do banco SQLite.

use serde::{Deserialize, Serialize};

use super::env_or;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Caminho do arquivo SQLite (relativo ao diretório atual)
    pub database_path: String,
    pub workers: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "0.0.0.0".to_string(),
            port: 5022,
            database_path: "data/projudi.db".to_string(),
            workers: 1,
        }
    }
}

impl AppConfig {
    /// APP_HOST, APP_PORT, DATABASE_PATH, APP_WORKERS
    pub fn from_env() -> Self {
        let default = AppConfig::default();
        AppConfig {
            host: env_or("APP_HOST", default.host),
            port: env_or("APP_PORT", default.port),
            database_path: env_or("DATABASE_PATH", default.database_path),
            workers: env_or("APP_WORKERS", default.workers).max(1),
        }
    }

    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.database_path)
    }
}
