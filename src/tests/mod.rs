//! tests/mod.rs
//! Testes do serviço e material compartilhado (respostas MNI de exemplo, banco em memória).

mod projudi_tests;
mod xml_tests;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

use crate::services::consulta_service::ConsultaService;

/// Número válido do TJPR usado nas respostas abaixo
pub(crate) const NUMERO_TJPR: &str = "0001234-56.2024.8.16.0001";

/// Resposta completa de `consultarProcesso` (MNI 2.2.2)
pub(crate) const RESPOSTA_MNI: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <ns2:consultarProcessoResposta xmlns:ns2="http://www.cnj.jus.br/servico-intercomunicacao-2.2.2/" xmlns="http://www.cnj.jus.br/intercomunicacao-2.2.2">
      <sucesso>true</sucesso>
      <mensagem>Processo consultado com sucesso</mensagem>
      <processo>
        <dadosBasicos numero="00012345620248160001" classeProcessual="7" codigoLocalidade="6015" competencia="1" nivelSigilo="0" dataAjuizamento="20240115093000">
          <polo polo="AT">
            <parte>
              <pessoa nome="Maria da Silva" tipoPessoa="fisica" numeroDocumentoPrincipal="12345678909"/>
              <advogado nome="João Pereira" inscricao="PR12345"/>
            </parte>
          </polo>
          <polo polo="PA">
            <parte>
              <pessoa nome="Banco Exemplo S.A." tipoPessoa="juridica" numeroDocumentoPrincipal="00000000000191"/>
            </parte>
            <parte>
              <pessoa nome="Seguradora Beta Ltda." tipoPessoa="juridica"/>
            </parte>
          </polo>
          <polo polo="TC">
            <parte>
              <pessoa nome="Ministério Público do Estado do Paraná" tipoPessoa="autoridade"/>
            </parte>
          </polo>
          <assunto principal="true">
            <codigoNacional>7780</codigoNacional>
          </assunto>
          <assunto>
            <assuntoLocal codigoAssunto="99" descricao="Indenização por dano moral"/>
          </assunto>
          <orgaoJulgador codigoOrgao="1234" nomeOrgao="1ª Vara Cível de Curitiba" instancia="ORIG" codigoMunicipioIBGE="4106902"/>
          <valorCausa>15000.50</valorCausa>
        </dadosBasicos>
        <movimento dataHora="20240115093000" identificadorMovimento="1">
          <movimentoNacional codigoNacional="26"/>
          <complemento>Distribuído por sorteio</complemento>
        </movimento>
        <movimento dataHora="20240201101500">
          <movimentoLocal codigoMovimento="501" descricao="Juntada de petição"/>
        </movimento>
        <documento idDocumento="doc-1" tipoDocumento="58" dataHora="20240115093000" descricao="Petição inicial" mimetype="application/pdf"/>
      </processo>
    </ns2:consultarProcessoResposta>
  </soap:Body>
</soap:Envelope>"#;

/// SOAP Fault devolvido quando as credenciais são recusadas
pub(crate) const RESPOSTA_FAULT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <soap:Fault>
      <faultcode>soap:Server</faultcode>
      <faultstring>Usuário ou senha inválidos</faultstring>
    </soap:Fault>
  </soap:Body>
</soap:Envelope>"#;

/// Resposta com sucesso=false
pub(crate) const RESPOSTA_RECUSADA: &str = r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <ns2:consultarProcessoResposta xmlns:ns2="http://www.cnj.jus.br/servico-intercomunicacao-2.2.2/">
      <sucesso>false</sucesso>
      <mensagem>Processo não localizado</mensagem>
    </ns2:consultarProcessoResposta>
  </soap:Body>
</soap:Envelope>"#;

/// Resposta MNI cortada antes dos documentos (conexão interrompida)
pub(crate) fn resposta_truncada() -> &'static str {
    let corte = RESPOSTA_MNI.find("<documento").unwrap_or(RESPOSTA_MNI.len());
    &RESPOSTA_MNI[..corte]
}

/// SQLite em memória com as migrações aplicadas. Uma conexão só: cada conexão
/// `:memory:` teria o próprio banco.
pub(crate) async fn memory_pool() -> Pool<Sqlite> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Falha ao abrir SQLite em memória");

    ConsultaService::new(pool.clone())
        .run_migrations()
        .await
        .expect("Falha nas migrações de teste");

    pool
}
