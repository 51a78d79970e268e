//! handlers/consulta_handler.rs
use actix_web::{web, HttpResponse};

use crate::handlers::{not_found_or_internal, PaginationQuery};
use crate::services::consulta_service::ConsultaService;

/// GET /api/consultas
pub async fn list_consultas_endpoint(
    consulta_service: web::Data<ConsultaService>,
    query: web::Query<PaginationQuery>,
) -> HttpResponse {
    let page = query.page.unwrap_or(1);
    let page_size = query.page_size.unwrap_or(10);

    match consulta_service.list_consultas(page, page_size).await {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": "Internal server error",
            "details": format!("{:?}", e)
        })),
    }
}

/// GET /api/consultas/{id}
pub async fn get_consulta_endpoint(
    consulta_service: web::Data<ConsultaService>,
    path: web::Path<String>,
) -> HttpResponse {
    let id = path.into_inner();

    match consulta_service.get_consulta(&id).await {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e) => not_found_or_internal("Consulta não encontrada", e),
    }
}
