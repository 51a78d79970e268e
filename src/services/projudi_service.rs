//! services/projudi_service.rs
//! Cliente SOAP do PROJUDI (MNI 2.2.2, operação `consultarProcesso`).
//!
//! Uma chamada de saída por consulta. Falhas de transporte, HTTP e SOAP Fault
//! viram um erro genérico com a mensagem do servidor anexada.

use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use quick_xml::escape::escape;
use reqwest::{Client, StatusCode};

use crate::config::projudi_config::ProjudiConfig;
use crate::models::processo_model::ProcessoMapeado;
use crate::services::cnj_service::{only_digits, CNJ_DIGITS};
use crate::services::mni_service::map_consulta_resposta;
use crate::services::xml_service::{find_first, parse_xml, TEXT_KEY};

const NS_SOAP: &str = "http://schemas.xmlsoap.org/soap/envelope/";
const NS_SERVICO: &str = "http://www.cnj.jus.br/servico-intercomunicacao-2.2.2/";
const NS_TIPOS: &str = "http://www.cnj.jus.br/tipos-servico-intercomunicacao-2.2.2";
const SOAP_ACTION: &str = "consultarProcesso";
/// Quanto do corpo de uma resposta de erro entra na mensagem
const MAX_ERROR_BODY: usize = 500;

#[derive(Clone)]
pub struct ProjudiService {
    http_client: Client,
    config: ProjudiConfig,
}

impl ProjudiService {
    pub fn new(config: ProjudiConfig) -> Result<Self> {
        let http_client = Client::builder()
            .connect_timeout(config.timeout())
            .build()
            .context("Não foi possível criar o cliente HTTP do PROJUDI")?;

        if !config.has_credentials() {
            log::warn!("PROJUDI_USER não configurado; consultas podem ser recusadas");
        }

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Consulta um processo e devolve a forma interna já mapeada.
    pub async fn consultar_processo(&self, numero: &str) -> Result<ProcessoMapeado> {
        let start = Instant::now();
        let digits = only_digits(numero);
        if digits.len() != CNJ_DIGITS {
            return Err(anyhow!(
                "Número de processo inválido para consulta: {:?} ({} dígitos)",
                numero,
                digits.len()
            ));
        }

        log::info!("(consultar_processo) Consultando {} no PROJUDI...", digits);

        let envelope = self.build_envelope(&digits);
        let (status, xml) = tokio::time::timeout(self.config.timeout(), self.send_envelope(envelope))
            .await
            .map_err(|_| {
                anyhow!(
                    "Falha na consulta ao PROJUDI: sem resposta em {}s",
                    self.config.timeout_secs
                )
            })?
            .map_err(|e| anyhow!("Falha na consulta ao PROJUDI: {:#}", e))?;

        let processo = interpretar_resposta(status, &xml, &digits)?;

        log::info!(
            "(consultar_processo) {} mapeado em {:.2}s ({} partes, {} movimentos)",
            processo.numero,
            start.elapsed().as_secs_f32(),
            processo.partes.len(),
            processo.movimentos.len()
        );
        Ok(processo)
    }

    /// Envelope `consultarProcesso`. `numero_digits` deve ter só dígitos.
    pub fn build_envelope(&self, numero_digits: &str) -> String {
        format!(
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8"?>"#,
                r#"<soapenv:Envelope xmlns:soapenv="{ns_soap}" xmlns:ser="{ns_servico}" xmlns:tip="{ns_tipos}">"#,
                "<soapenv:Header/>",
                "<soapenv:Body>",
                "<ser:consultarProcesso>",
                "<tip:idConsultante>{id}</tip:idConsultante>",
                "<tip:senhaConsultante>{senha}</tip:senhaConsultante>",
                "<tip:numeroProcesso>{numero}</tip:numeroProcesso>",
                "<tip:movimentos>{movimentos}</tip:movimentos>",
                "<tip:incluirCabecalho>true</tip:incluirCabecalho>",
                "<tip:incluirDocumentos>{documentos}</tip:incluirDocumentos>",
                "</ser:consultarProcesso>",
                "</soapenv:Body>",
                "</soapenv:Envelope>"
            ),
            ns_soap = NS_SOAP,
            ns_servico = NS_SERVICO,
            ns_tipos = NS_TIPOS,
            id = escape(self.config.id_consultante.as_str()),
            senha = escape(self.config.senha_consultante.as_str()),
            numero = escape(numero_digits),
            movimentos = self.config.incluir_movimentos,
            documentos = self.config.incluir_documentos,
        )
    }

    async fn send_envelope(&self, envelope: String) -> Result<(StatusCode, String)> {
        let response = self
            .http_client
            .post(&self.config.endpoint)
            .header("Content-Type", "text/xml; charset=utf-8")
            .header("SOAPAction", SOAP_ACTION)
            .body(envelope)
            .send()
            .await
            .context("Erro de comunicação com o PROJUDI")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Erro lendo a resposta do PROJUDI")?;

        Ok((status, body))
    }
}

/// Parte pura da consulta: lê o XML, detecta Fault e mapeia o processo.
/// XML incompleto não é erro: o mapeador trabalha com o que foi lido.
pub fn parse_resposta(xml: &str, numero: &str) -> Result<ProcessoMapeado> {
    interpretar_resposta(StatusCode::OK, xml, numero)
}

/// Fault SOAP costuma vir com HTTP 500 e explica melhor que o status, então o
/// corpo é lido antes. Sem Fault, status fora de 2xx vira erro com o trecho do corpo.
pub fn interpretar_resposta(status: StatusCode, xml: &str, numero: &str) -> Result<ProcessoMapeado> {
    let parsed = parse_xml(xml);
    if let Some(err) = &parsed.error {
        log::warn!(
            "(interpretar_resposta) Resposta do PROJUDI para {} lida parcialmente: {}",
            numero,
            err
        );
    }

    if let Some(fault) = find_first(&parsed.value, "Fault") {
        let mensagem = find_first(fault, "faultstring")
            .or_else(|| find_first(fault, "Text"))
            .and_then(|v| v.as_str().or_else(|| v.get(TEXT_KEY).and_then(|t| t.as_str())))
            .unwrap_or("SOAP Fault sem descrição");
        return Err(anyhow!("Falha na consulta ao PROJUDI: {}", mensagem));
    }

    if !status.is_success() {
        let trecho: String = xml.chars().take(MAX_ERROR_BODY).collect();
        return Err(anyhow!(
            "Falha na consulta ao PROJUDI: HTTP {} do PROJUDI: {}",
            status,
            trecho.trim()
        ));
    }

    map_consulta_resposta(&parsed.value, numero)
}
