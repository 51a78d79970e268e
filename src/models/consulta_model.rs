//! models/consulta_model.rs
//! Registro de cada consulta feita ao PROJUDI.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ConsultaRecord {
    pub id: String,
    pub numero: String,
    pub status: String, // "pending", "running", "done", "failed"
    pub error_message: Option<String>,
    pub processo_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConsultaStatusResponse {
    pub id: String,
    pub numero: String,
    pub status: String,
    pub error_message: Option<String>,
    pub processo_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Para listar consultas com paginação
#[derive(Debug, Clone, Serialize)]
pub struct ListConsultasResponse {
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub items: Vec<ConsultaStatusResponse>,
}
