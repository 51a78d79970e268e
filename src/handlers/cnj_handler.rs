//! handlers/cnj_handler.rs
//! Endpoints de normalização e decomposição do número CNJ.

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::models::cnj_model::{CnjDetailsResponse, CnjNumber, NormalizeRequest, NormalizeResponse};
use crate::services::cnj_service::{format_cnj_number, only_digits, CNJ_DIGITS};

/// POST /api/cnj/normalize
pub async fn normalize_endpoint(body: web::Json<NormalizeRequest>) -> HttpResponse {
    let original = body.into_inner().numero;
    let normalizado = format_cnj_number(&original);
    let valido = only_digits(&original).len() == CNJ_DIGITS;
    let digitos_verificadores_ok = CnjNumber::parse(&original)
        .map(|n| n.has_valid_check_digits())
        .unwrap_or(false);

    HttpResponse::Ok().json(NormalizeResponse {
        original,
        normalizado,
        valido,
        digitos_verificadores_ok,
    })
}

/// GET /api/cnj/{numero}
pub async fn details_endpoint(path: web::Path<String>) -> HttpResponse {
    let numero = path.into_inner();

    match CnjNumber::parse(&numero) {
        Ok(cnj) => HttpResponse::Ok().json(CnjDetailsResponse {
            numero: cnj.formatted(),
            segmento: cnj.segmento(),
            tribunal: cnj.tribunal(),
            digitos_verificadores_ok: cnj.has_valid_check_digits(),
            digitos_verificadores_esperados: cnj.expected_check_digits(),
            componentes: cnj,
        }),
        Err(e) => HttpResponse::BadRequest().json(json!({
            "error": "Número CNJ inválido",
            "details": e.to_string()
        })),
    }
}
