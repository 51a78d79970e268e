//! handlers/processo_handler.rs
use actix_web::{web, HttpResponse};

use crate::handlers::{not_found_or_internal, PaginationQuery};
use crate::services::processo_service::ProcessoService;

/// GET /api/processos
pub async fn list_processos_endpoint(
    processo_service: web::Data<ProcessoService>,
    query: web::Query<PaginationQuery>,
) -> HttpResponse {
    let page = query.page.unwrap_or(1);
    let page_size = query.page_size.unwrap_or(10);

    match processo_service.list_processos(page, page_size).await {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": "Internal server error",
            "details": format!("{:?}", e)
        })),
    }
}

/// GET /api/processos/{numero}
pub async fn get_processo_endpoint(
    processo_service: web::Data<ProcessoService>,
    path: web::Path<String>,
) -> HttpResponse {
    let numero = path.into_inner();

    match processo_service.get_processo(&numero).await {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e) => not_found_or_internal("Processo não encontrado", e),
    }
}

/// POST /api/processos/normalizar-numeros
/// Reescreve os números gravados na forma canônica CNJ.
pub async fn normalize_numbers_endpoint(
    processo_service: web::Data<ProcessoService>,
) -> HttpResponse {
    match processo_service.normalize_stored_numbers().await {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => {
            log::error!("Erro normalizando números: {:?}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Internal server error",
                "details": format!("{:?}", e)
            }))
        }
    }
}
