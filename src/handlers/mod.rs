//! handlers/mod.rs
//! Módulo que agrupa os handlers HTTP (CNJ, PROJUDI, processos, consultas).

use actix_web::{http::StatusCode, HttpResponse};
use serde::Deserialize;

pub mod cnj_handler;
pub mod consulta_handler;
pub mod processo_handler;
pub mod projudi_handler;

#[derive(Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// 404 quando o serviço disse "não encontrado", 500 no resto.
pub(crate) fn not_found_or_internal(label: &str, e: anyhow::Error) -> HttpResponse {
    let (status, error) = if e.to_string().contains("não encontrad") {
        (StatusCode::NOT_FOUND, label)
    } else {
        log::error!("{}: {:?}", label, e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    };

    HttpResponse::build(status).json(serde_json::json!({
        "error": error,
        "details": format!("{:#}", e)
    }))
}
