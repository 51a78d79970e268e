//! models/projudi_model.rs
//! Requests/responses dos endpoints de integração com o PROJUDI.

use serde::{Deserialize, Serialize};

use crate::models::processo_model::ProcessoMapeado;

#[derive(Debug, Clone, Deserialize)]
pub struct ConsultarProcessoRequest {
    pub numero: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportarProcessoResponse {
    pub success: bool,
    pub consulta_id: String,
    pub processo_id: String,
    pub processo: ProcessoMapeado,
}
