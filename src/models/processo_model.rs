//! models/processo_model.rs
//! Forma interna de processo/parte/órgão julgador produzida pelo mapeador MNI,
//! e os registros persistidos em SQLite.

use serde::{Deserialize, Serialize};

use crate::models::cnj_model::Tribunal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Polo {
    Autor,
    Reu,
    TerceiroInteressado,
}

impl Polo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Polo::Autor => "AUTOR",
            Polo::Reu => "REU",
            Polo::TerceiroInteressado => "TERCEIRO_INTERESSADO",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Instancia {
    PrimeiroGrau,
    SegundoGrau,
    TurmaRecursal,
    Superior,
}

impl Instancia {
    pub fn as_str(&self) -> &'static str {
        match self {
            Instancia::PrimeiroGrau => "PRIMEIRO_GRAU",
            Instancia::SegundoGrau => "SEGUNDO_GRAU",
            Instancia::TurmaRecursal => "TURMA_RECURSAL",
            Instancia::Superior => "SUPERIOR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advogado {
    pub nome: String,
    /// Inscrição na OAB (ex.: "PR12345")
    pub oab: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parte {
    pub nome: String,
    pub documento: Option<String>,
    /// "fisica", "juridica", "autoridade"...
    pub tipo_pessoa: Option<String>,
    pub polo: Polo,
    pub advogados: Vec<Advogado>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrgaoJulgador {
    pub nome: Option<String>,
    pub codigo: Option<String>,
    pub instancia: Instancia,
    pub codigo_municipio_ibge: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movimento {
    pub data_hora: Option<String>,
    pub codigo: Option<String>,
    pub descricao: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentoRef {
    pub id: Option<String>,
    pub tipo: Option<String>,
    pub descricao: Option<String>,
    pub data_hora: Option<String>,
    pub mimetype: Option<String>,
}

/// Processo já mapeado a partir da resposta MNI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessoMapeado {
    /// Número no formato CNJ canônico
    pub numero: String,
    pub classe: Option<String>,
    pub assuntos: Vec<String>,
    pub valor_causa: Option<f64>,
    pub data_ajuizamento: Option<String>,
    pub nivel_sigilo: Option<u8>,
    pub tribunal: Option<Tribunal>,
    pub orgao_julgador: Option<OrgaoJulgador>,
    pub partes: Vec<Parte>,
    pub movimentos: Vec<Movimento>,
    pub documentos: Vec<DocumentoRef>,
}

/// Linha da tabela `processos`
#[derive(Debug, Clone, Serialize)]
pub struct ProcessoRecord {
    pub id: String,
    pub numero: String,
    pub classe: Option<String>,
    pub tribunal: Option<String>,
    pub orgao_julgador: Option<String>,
    pub instancia: Option<String>,
    pub valor_causa: Option<f64>,
    pub data_ajuizamento: Option<String>,
    pub partes: Vec<ParteRecord>,
    pub dados: Option<ProcessoMapeado>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParteRecord {
    pub id: String,
    pub nome: String,
    pub documento: Option<String>,
    pub tipo_pessoa: Option<String>,
    pub polo: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessoSummary {
    pub id: String,
    pub numero: String,
    pub classe: Option<String>,
    pub tribunal: Option<String>,
    pub instancia: Option<String>,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListProcessosResponse {
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub items: Vec<ProcessoSummary>,
}

/// Resultado da normalização dos números já gravados
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizationReport {
    pub scanned: u64,
    pub updated: u64,
    pub unchanged: u64,
    /// Reescritas que colidiriam com um número canônico já existente
    pub conflicts: Vec<String>,
}
