//! app.rs
use crate::handlers::{cnj_handler, consulta_handler, processo_handler, projudi_handler};
use actix_web::web;

pub fn init_app(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(
                web::scope("/cnj")
                    .route("/normalize", web::post().to(cnj_handler::normalize_endpoint))
                    .route("/{numero}", web::get().to(cnj_handler::details_endpoint)),
            )
            .service(
                web::scope("/projudi")
                    .route(
                        "/consultar",
                        web::post().to(projudi_handler::consultar_endpoint),
                    )
                    .route(
                        "/importar",
                        web::post().to(projudi_handler::importar_endpoint),
                    ),
            )
            .service(
                web::scope("/processos")
                    .route(
                        "",
                        web::get().to(processo_handler::list_processos_endpoint),
                    )
                    .route(
                        "/normalizar-numeros",
                        web::post().to(processo_handler::normalize_numbers_endpoint),
                    )
                    .route(
                        "/{numero}",
                        web::get().to(processo_handler::get_processo_endpoint),
                    ),
            )
            .service(
                web::scope("/consultas")
                    .route(
                        "",
                        web::get().to(consulta_handler::list_consultas_endpoint),
                    )
                    .route(
                        "/{id}",
                        web::get().to(consulta_handler::get_consulta_endpoint),
                    ),
            ),
    );
}
