//! tests/projudi_tests.rs
//! Cliente SOAP do PROJUDI contra um servidor local que imita o webservice.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use actix_rt::test;
    use actix_web::{http::StatusCode, web, App, HttpResponse, HttpServer};

    use crate::config::projudi_config::ProjudiConfig;
    use crate::services::consulta_service::ConsultaService;
    use crate::services::processo_service::ProcessoService;
    use crate::services::projudi_service::{interpretar_resposta, parse_resposta, ProjudiService};
    use crate::services::sync_service::SyncService;
    use crate::tests::{memory_pool, NUMERO_TJPR, RESPOSTA_FAULT, RESPOSTA_MNI};

    /// Sobe um servidor em porta livre que responde sempre `body` com `status`.
    fn mock_projudi(status: u16, body: &'static str) -> String {
        let server = HttpServer::new(move || {
            App::new().route(
                "/ws",
                web::post().to(move || async move {
                    let status =
                        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                    HttpResponse::build(status)
                        .content_type("text/xml; charset=utf-8")
                        .body(body)
                }),
            )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind do mock");

        let addr = server.addrs()[0];
        actix_rt::spawn(server.run());
        format!("http://{}/ws", addr)
    }

    /// Servidor que só responde depois de `delay`.
    fn mock_projudi_lento(delay: Duration) -> String {
        let server = HttpServer::new(move || {
            App::new().route(
                "/ws",
                web::post().to(move || async move {
                    actix_rt::time::sleep(delay).await;
                    HttpResponse::Ok()
                        .content_type("text/xml; charset=utf-8")
                        .body(RESPOSTA_MNI)
                }),
            )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind do mock");

        let addr = server.addrs()[0];
        actix_rt::spawn(server.run());
        format!("http://{}/ws", addr)
    }

    fn service_for(endpoint: String) -> ProjudiService {
        ProjudiService::new(ProjudiConfig {
            endpoint,
            id_consultante: "advogado".to_string(),
            senha_consultante: "s3nh@<&>".to_string(),
            timeout_secs: 5,
            ..Default::default()
        })
        .expect("cliente")
    }

    #[test]
    async fn test_envelope_contents() {
        let service = service_for("http://127.0.0.1:1/ws".to_string());
        let envelope = service.build_envelope("00012345620248160001");

        assert!(envelope.contains("<ser:consultarProcesso>"));
        assert!(envelope.contains("<tip:idConsultante>advogado</tip:idConsultante>"));
        assert!(envelope.contains("<tip:senhaConsultante>s3nh@&lt;&amp;&gt;</tip:senhaConsultante>"));
        assert!(envelope.contains("<tip:numeroProcesso>00012345620248160001</tip:numeroProcesso>"));
        assert!(envelope.contains("<tip:movimentos>true</tip:movimentos>"));
        assert!(envelope.contains("<tip:incluirDocumentos>false</tip:incluirDocumentos>"));
    }

    #[test]
    async fn test_invalid_number_is_rejected_before_request() {
        // porta 1: se houvesse requisição, o erro seria de conexão
        let service = service_for("http://127.0.0.1:1/ws".to_string());
        let err = service.consultar_processo("abc123").await.unwrap_err();
        assert!(err.to_string().contains("inválido"));
    }

    #[test]
    async fn test_parse_fault() {
        let err = parse_resposta(RESPOSTA_FAULT, NUMERO_TJPR).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Falha na consulta ao PROJUDI"));
        assert!(msg.contains("Usuário ou senha inválidos"));
    }

    #[test]
    async fn test_consultar_processo_against_mock() {
        let endpoint = mock_projudi(200, RESPOSTA_MNI);
        let service = service_for(endpoint);

        let processo = service
            .consultar_processo(NUMERO_TJPR)
            .await
            .expect("consulta ok");
        assert_eq!(processo.numero, NUMERO_TJPR);
        assert_eq!(processo.partes.len(), 4);
    }

    #[test]
    async fn test_fault_with_http_500() {
        let endpoint = mock_projudi(500, RESPOSTA_FAULT);
        let service = service_for(endpoint);

        let err = service.consultar_processo(NUMERO_TJPR).await.unwrap_err();
        assert!(err.to_string().contains("Usuário ou senha inválidos"));
    }

    #[test]
    async fn test_http_error_carries_upstream_body() {
        let endpoint = mock_projudi(503, "Serviço em manutenção");
        let service = service_for(endpoint);

        let err = service.consultar_processo(NUMERO_TJPR).await.unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("Falha na consulta ao PROJUDI"));
        assert!(msg.contains("503"));
        assert!(msg.contains("Serviço em manutenção"));
    }

    #[test]
    async fn test_http_error_with_fault_word_but_no_soap_fault() {
        let endpoint = mock_projudi(503, "<html><body>Gateway Fault: backend down</body></html>");
        let service = service_for(endpoint);

        let err = service.consultar_processo(NUMERO_TJPR).await.unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("Falha na consulta ao PROJUDI"), "{}", msg);
        assert!(msg.contains("503"), "{}", msg);
        assert!(msg.contains("Gateway Fault: backend down"), "{}", msg);
    }

    #[test]
    async fn test_status_checked_after_fault_lookup() {
        // Fault vence o status; sem Fault, o status vence o mapeamento
        let err = interpretar_resposta(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            RESPOSTA_FAULT,
            NUMERO_TJPR,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Usuário ou senha inválidos"));

        let err = interpretar_resposta(reqwest::StatusCode::BAD_GATEWAY, RESPOSTA_MNI, NUMERO_TJPR)
            .unwrap_err();
        assert!(err.to_string().contains("HTTP 502"));

        let processo =
            interpretar_resposta(reqwest::StatusCode::OK, RESPOSTA_MNI, NUMERO_TJPR).unwrap();
        assert_eq!(processo.numero, NUMERO_TJPR);
    }

    #[test]
    async fn test_slow_upstream_times_out() {
        let endpoint = mock_projudi_lento(Duration::from_secs(5));
        let service = ProjudiService::new(ProjudiConfig {
            endpoint,
            timeout_secs: 1,
            ..Default::default()
        })
        .expect("cliente");

        let err = service.consultar_processo(NUMERO_TJPR).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Falha na consulta ao PROJUDI"), "{}", msg);
        assert!(msg.contains("sem resposta em 1s"), "{}", msg);
    }

    #[test]
    async fn test_connection_error_is_wrapped() {
        let service = service_for("http://127.0.0.1:1/ws".to_string());
        let err = service.consultar_processo(NUMERO_TJPR).await.unwrap_err();
        assert!(err.to_string().contains("Falha na consulta ao PROJUDI"));
    }

    #[test]
    async fn test_importar_processo_end_to_end() {
        let pool = memory_pool().await;
        let consulta_service = ConsultaService::new(pool.clone());
        let processo_service = ProcessoService::new(pool);
        let sync = SyncService::new(
            service_for(mock_projudi(200, RESPOSTA_MNI)),
            consulta_service.clone(),
            processo_service.clone(),
        );

        let importacao = sync
            .importar_processo("00012345620248160001")
            .await
            .expect("importação");

        let consulta = consulta_service
            .get_consulta(&importacao.consulta_id)
            .await
            .unwrap();
        assert_eq!(consulta.status, "done");
        assert_eq!(consulta.numero, NUMERO_TJPR);
        assert_eq!(consulta.processo_id.as_deref(), Some(importacao.processo_id.as_str()));

        let record = processo_service.get_processo(NUMERO_TJPR).await.unwrap();
        assert_eq!(record.id, importacao.processo_id);
        assert_eq!(record.partes.len(), 4);
    }

    #[test]
    async fn test_importar_processo_failure_marks_consulta() {
        let pool = memory_pool().await;
        let consulta_service = ConsultaService::new(pool.clone());
        let sync = SyncService::new(
            service_for(mock_projudi(500, RESPOSTA_FAULT)),
            consulta_service.clone(),
            ProcessoService::new(pool),
        );

        let err = sync.importar_processo(NUMERO_TJPR).await.unwrap_err();
        assert!(!err.consulta_id.is_empty());

        let source = std::error::Error::source(&err).expect("erro de origem");
        assert!(source.to_string().contains("Usuário ou senha inválidos"));
        let consulta_id = err.consulta_id.clone();
        let chained = anyhow::Error::new(err).context("importação");
        assert!(format!("{:#}", chained).contains(&consulta_id));

        let consulta = consulta_service.get_consulta(&consulta_id).await.unwrap();
        assert_eq!(consulta.status, "failed");
        assert!(consulta
            .error_message
            .unwrap_or_default()
            .contains("Usuário ou senha inválidos"));
    }
}
