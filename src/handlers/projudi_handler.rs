//! handlers/projudi_handler.rs
//! Consulta e importação de processos do PROJUDI.

use actix_web::{web, HttpResponse};
use log::error;
use serde_json::json;

use crate::models::projudi_model::{ConsultarProcessoRequest, ImportarProcessoResponse};
use crate::services::cnj_service::{only_digits, CNJ_DIGITS};
use crate::services::projudi_service::ProjudiService;
use crate::services::sync_service::SyncService;

fn invalid_number(numero: &str) -> Option<HttpResponse> {
    let digits = only_digits(numero).len();
    if digits == CNJ_DIGITS {
        return None;
    }
    Some(HttpResponse::BadRequest().json(json!({
        "success": false,
        "error": format!("Número de processo deve ter {} dígitos (recebidos {})", CNJ_DIGITS, digits)
    })))
}

/// POST /api/projudi/consultar
/// Consulta sem gravar nada; devolve o processo mapeado.
pub async fn consultar_endpoint(
    projudi_service: web::Data<ProjudiService>,
    body: web::Json<ConsultarProcessoRequest>,
) -> HttpResponse {
    let numero = body.into_inner().numero;
    if let Some(resp) = invalid_number(&numero) {
        return resp;
    }

    match projudi_service.consultar_processo(&numero).await {
        Ok(processo) => HttpResponse::Ok().json(processo),
        Err(e) => {
            error!("Erro consultando PROJUDI: {:#}", e);
            HttpResponse::BadGateway().json(json!({
                "success": false,
                "error": format!("{:#}", e)
            }))
        }
    }
}

/// POST /api/projudi/importar
/// Consulta, grava o processo e devolve o id da consulta registrada.
pub async fn importar_endpoint(
    sync_service: web::Data<SyncService>,
    body: web::Json<ConsultarProcessoRequest>,
) -> HttpResponse {
    let numero = body.into_inner().numero;
    if let Some(resp) = invalid_number(&numero) {
        return resp;
    }

    match sync_service.importar_processo(&numero).await {
        Ok(importacao) => HttpResponse::Ok().json(ImportarProcessoResponse {
            success: true,
            consulta_id: importacao.consulta_id,
            processo_id: importacao.processo_id,
            processo: importacao.processo,
        }),
        Err(e) => {
            error!("Erro importando processo: {}", e);
            HttpResponse::BadGateway().json(json!({
                "success": false,
                "consulta_id": e.consulta_id,
                "error": format!("{:#}", e.error)
            }))
        }
    }
}
