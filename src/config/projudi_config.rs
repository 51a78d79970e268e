//! config/projudi_config.rs
//! Parâmetros de acesso ao webservice MNI do PROJUDI.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::env_or;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjudiConfig {
    /// Endpoint SOAP (MNI 2.2.2)
    pub endpoint: String,
    pub id_consultante: String,
    #[serde(skip_serializing)]
    pub senha_consultante: String,
    pub timeout_secs: u64,
    pub incluir_movimentos: bool,
    pub incluir_documentos: bool,
}

impl Default for ProjudiConfig {
    fn default() -> Self {
        ProjudiConfig {
            endpoint: "https://projudi.tjpr.jus.br/projudi/webservices/intercomunicacao".to_string(),
            id_consultante: String::new(),
            senha_consultante: String::new(),
            timeout_secs: 30,
            incluir_movimentos: true,
            incluir_documentos: false,
        }
    }
}

impl ProjudiConfig {
    /// PROJUDI_URL, PROJUDI_USER, PROJUDI_PASSWORD, PROJUDI_TIMEOUT_SECS,
    /// PROJUDI_INCLUIR_MOVIMENTOS, PROJUDI_INCLUIR_DOCUMENTOS
    pub fn from_env() -> Self {
        let default = ProjudiConfig::default();
        ProjudiConfig {
            endpoint: env_or("PROJUDI_URL", default.endpoint),
            id_consultante: env_or("PROJUDI_USER", default.id_consultante),
            senha_consultante: env_or("PROJUDI_PASSWORD", default.senha_consultante),
            timeout_secs: env_or("PROJUDI_TIMEOUT_SECS", default.timeout_secs),
            incluir_movimentos: env_or("PROJUDI_INCLUIR_MOVIMENTOS", default.incluir_movimentos),
            incluir_documentos: env_or("PROJUDI_INCLUIR_DOCUMENTOS", default.incluir_documentos),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn has_credentials(&self) -> bool {
        !self.id_consultante.is_empty()
    }
}
