//! models/cnj_model.rs
//! Estruturas do número único de processo (CNJ, Resolução 65/2008).

use serde::{Deserialize, Serialize};

/// Número CNJ decomposto: NNNNNNN-DD.AAAA.J.TR.OOOO
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CnjNumber {
    pub sequencial: String,
    pub digito_verificador: String,
    pub ano: String,
    /// J: segmento do Poder Judiciário
    pub segmento: String,
    /// TR: tribunal dentro do segmento
    pub tribunal: String,
    /// OOOO: unidade de origem
    pub origem: String,
}

/// Segmentos do Judiciário (dígito J).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Segmento {
    SupremoTribunalFederal,
    ConselhoNacionalDeJustica,
    SuperiorTribunalDeJustica,
    JusticaFederal,
    JusticaDoTrabalho,
    JusticaEleitoral,
    JusticaMilitarDaUniao,
    JusticaEstadual,
    JusticaMilitarEstadual,
    Desconhecido,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tribunal {
    /// Ex.: "TJPR", "TRF4", "TRT9", "STJ"
    pub sigla: String,
    /// Código TR como aparece no número
    pub codigo: String,
    /// UF quando o tribunal é estadual/eleitoral
    pub uf: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NormalizeRequest {
    pub numero: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NormalizeResponse {
    pub original: String,
    pub normalizado: String,
    /// true quando restaram exatamente 20 dígitos
    pub valido: bool,
    pub digitos_verificadores_ok: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CnjDetailsResponse {
    pub numero: String,
    pub componentes: CnjNumber,
    pub segmento: Segmento,
    pub tribunal: Option<Tribunal>,
    pub digitos_verificadores_ok: bool,
    pub digitos_verificadores_esperados: String,
}
