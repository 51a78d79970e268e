//! services/mni_service.rs
//! Mapeador MNI: projeta a resposta `consultarProcesso` (já convertida em
//! `serde_json::Value` pelo xml_service) na forma interna de processo/parte/órgão.
//!
//! A leitura é tolerante: todo campo é opcional, aceita valor único ou array,
//! atributo (`@campo`) ou elemento (`campo`), e números/booleanos viram texto.

use anyhow::{anyhow, Result};
use chrono::NaiveDateTime;
use serde_json::Value;

use crate::models::cnj_model::CnjNumber;
use crate::models::processo_model::{
    Advogado, DocumentoRef, Instancia, Movimento, OrgaoJulgador, Parte, Polo, ProcessoMapeado,
};
use crate::services::cnj_service::{format_cnj_number, only_digits, CNJ_DIGITS};
use crate::services::text_service::normalize_label;
use crate::services::xml_service::{find_first, ATTR_PREFIX, TEXT_KEY};

const POLO_REU: [&str; 3] = ["PASSIVO", "REU", "REQUERIDO"];
const POLO_AUTOR: [&str; 3] = ["ATIVO", "AUTOR", "REQUERENTE"];

/// Classifica o polo por substring sobre o rótulo normalizado.
/// O polo passivo é verificado antes do ativo.
pub fn classify_polo(raw: &str) -> Polo {
    let label = normalize_label(raw);
    if POLO_REU.iter().any(|k| label.contains(k)) {
        Polo::Reu
    } else if POLO_AUTOR.iter().any(|k| label.contains(k)) {
        Polo::Autor
    } else {
        Polo::TerceiroInteressado
    }
}

/// Expande os códigos `modalidadePoloProcessual` do MNI para um rótulo legível.
pub fn polo_label(code: &str) -> String {
    match normalize_label(code).as_str() {
        "AT" => "ATIVO".to_string(),
        "PA" => "PASSIVO".to_string(),
        "TC" => "TERCEIRO".to_string(),
        "FL" => "FISCAL DA LEI".to_string(),
        "AD" => "ASSISTENTE".to_string(),
        "VI" => "VITIMA".to_string(),
        _ => code.to_string(),
    }
}

/// Instância a partir do código MNI (`ORIG`, `REV`, `ESP`, `EXT`) e, na falta
/// dele, do nome do órgão julgador.
pub fn classify_instancia(codigo: Option<&str>, nome_orgao: Option<&str>) -> Instancia {
    if let Some(codigo) = codigo {
        match normalize_label(codigo).as_str() {
            "ORIG" => return Instancia::PrimeiroGrau,
            "REV" => return Instancia::SegundoGrau,
            "ESP" | "EXT" => return Instancia::Superior,
            _ => {}
        }
    }

    let nome = normalize_label(nome_orgao.unwrap_or_default());
    if nome.contains("RECURSAL") {
        Instancia::TurmaRecursal
    } else if ["SUPERIOR", "STJ", "STF"].iter().any(|k| nome.contains(k)) {
        Instancia::Superior
    } else if ["SEGUNDO GRAU", "2 GRAU", "2O GRAU", "CAMARA", "DESEMBARGADOR"]
        .iter()
        .any(|k| nome.contains(k))
    {
        Instancia::SegundoGrau
    } else {
        Instancia::PrimeiroGrau
    }
}

/// Lê o `consultarProcessoResposta` e mapeia o processo.
/// `sucesso=false` vira erro com a `mensagem` do tribunal.
pub fn map_consulta_resposta(root: &Value, numero_consultado: &str) -> Result<ProcessoMapeado> {
    let resposta = find_first(root, "consultarProcessoResposta").unwrap_or(root);

    let sucesso = field_text(resposta, "sucesso")
        .map(|s| s.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(true);
    if !sucesso {
        let mensagem = field_text(resposta, "mensagem")
            .unwrap_or_else(|| "sem mensagem do tribunal".to_string());
        return Err(anyhow!("PROJUDI recusou a consulta: {}", mensagem));
    }

    let processo = field(resposta, "processo")
        .and_then(first_of)
        .ok_or_else(|| anyhow!("Resposta do PROJUDI sem o elemento 'processo'"))?;

    Ok(map_processo(processo, numero_consultado))
}

/// Projeta o elemento `processo` na forma interna. Nunca falha: o que faltar
/// fica vazio.
pub fn map_processo(processo: &Value, numero_consultado: &str) -> ProcessoMapeado {
    let dados = field(processo, "dadosBasicos").and_then(first_of);

    // número do tribunal só vale se tiver os 20 dígitos CNJ
    let numero_bruto = dados
        .and_then(|d| field_text(d, "numero"))
        .filter(|n| only_digits(n).len() == CNJ_DIGITS)
        .unwrap_or_else(|| numero_consultado.to_string());
    let numero = format_cnj_number(numero_bruto.trim());
    let tribunal = CnjNumber::parse(&numero).ok().and_then(|n| n.tribunal());

    let mut processo_mapeado = ProcessoMapeado {
        numero,
        classe: None,
        assuntos: Vec::new(),
        valor_causa: None,
        data_ajuizamento: None,
        nivel_sigilo: None,
        tribunal,
        orgao_julgador: None,
        partes: Vec::new(),
        movimentos: list(processo, "movimento").map(map_movimento).collect(),
        documentos: list(processo, "documento").map(map_documento).collect(),
    };

    if let Some(dados) = dados {
        processo_mapeado.classe = field_text(dados, "classeProcessual");
        processo_mapeado.assuntos = list(dados, "assunto").filter_map(map_assunto).collect();
        processo_mapeado.valor_causa = field_text(dados, "valorCausa").and_then(|v| parse_valor(&v));
        processo_mapeado.data_ajuizamento =
            field_text(dados, "dataAjuizamento").map(|d| parse_data_mni(&d));
        processo_mapeado.nivel_sigilo =
            field_text(dados, "nivelSigilo").and_then(|n| n.trim().parse().ok());
        processo_mapeado.orgao_julgador = field(dados, "orgaoJulgador")
            .and_then(first_of)
            .map(map_orgao_julgador);
        processo_mapeado.partes = list(dados, "polo").flat_map(map_polo).collect();
    }

    processo_mapeado
}

fn map_polo(polo: &Value) -> Vec<Parte> {
    let codigo = field_text(polo, "polo").unwrap_or_default();
    let classificado = classify_polo(&polo_label(&codigo));

    list(polo, "parte")
        .filter_map(|parte| map_parte(parte, classificado))
        .collect()
}

fn map_parte(parte: &Value, polo: Polo) -> Option<Parte> {
    let pessoa = field(parte, "pessoa").and_then(first_of);

    let nome = pessoa
        .and_then(|p| field_text(p, "nome"))
        .or_else(|| field_text(parte, "nome"))
        .filter(|n| !n.trim().is_empty())?;

    let documento = pessoa.and_then(|p| {
        field_text(p, "numeroDocumentoPrincipal").or_else(|| {
            field(p, "documento")
                .and_then(first_of)
                .and_then(|d| field_text(d, "codigoDocumento"))
        })
    });

    let advogados = list(parte, "advogado")
        .filter_map(|adv| {
            let nome = field_text(adv, "nome")?;
            Some(Advogado {
                nome: nome.trim().to_string(),
                oab: field_text(adv, "inscricao"),
            })
        })
        .collect();

    Some(Parte {
        nome: nome.trim().to_string(),
        documento,
        tipo_pessoa: pessoa.and_then(|p| field_text(p, "tipoPessoa")),
        polo,
        advogados,
    })
}

fn map_orgao_julgador(orgao: &Value) -> OrgaoJulgador {
    let nome = field_text(orgao, "nomeOrgao");
    let codigo_instancia = field_text(orgao, "instancia");

    OrgaoJulgador {
        instancia: classify_instancia(codigo_instancia.as_deref(), nome.as_deref()),
        nome,
        codigo: field_text(orgao, "codigoOrgao"),
        codigo_municipio_ibge: field_text(orgao, "codigoMunicipioIBGE"),
    }
}

fn map_assunto(assunto: &Value) -> Option<String> {
    field_text(assunto, "codigoNacional").or_else(|| {
        field(assunto, "assuntoLocal")
            .and_then(first_of)
            .and_then(|local| {
                field_text(local, "descricao").or_else(|| field_text(local, "codigoAssunto"))
            })
    })
}

fn map_movimento(movimento: &Value) -> Movimento {
    let nacional = field(movimento, "movimentoNacional").and_then(first_of);
    let local = field(movimento, "movimentoLocal").and_then(first_of);

    let codigo = nacional
        .and_then(|m| field_text(m, "codigoNacional"))
        .or_else(|| local.and_then(|m| field_text(m, "codigoMovimento")));

    let descricao = local
        .and_then(|m| field_text(m, "descricao"))
        .or_else(|| {
            let complementos: Vec<String> = list(movimento, "complemento")
                .filter_map(value_text)
                .collect();
            if complementos.is_empty() {
                None
            } else {
                Some(complementos.join("; "))
            }
        });

    Movimento {
        data_hora: field_text(movimento, "dataHora").map(|d| parse_data_mni(&d)),
        codigo,
        descricao,
    }
}

fn map_documento(documento: &Value) -> DocumentoRef {
    DocumentoRef {
        id: field_text(documento, "idDocumento"),
        tipo: field_text(documento, "tipoDocumento"),
        descricao: field_text(documento, "descricao"),
        data_hora: field_text(documento, "dataHora").map(|d| parse_data_mni(&d)),
        mimetype: field_text(documento, "mimetype"),
    }
}

// --------------------------------------------------------------------------------
// Acesso tolerante ao objeto
// --------------------------------------------------------------------------------

/// Campo como atributo (`@nome`) ou elemento (`nome`).
fn field<'a>(value: &'a Value, name: &str) -> Option<&'a Value> {
    let obj = value.as_object()?;
    obj.get(&format!("{}{}", ATTR_PREFIX, name))
        .or_else(|| obj.get(name))
}

/// Texto do campo; vazio conta como ausente.
fn field_text(value: &Value, name: &str) -> Option<String> {
    field(value, name).and_then(first_of).and_then(value_text)
}

fn value_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Object(obj) => obj.get(TEXT_KEY).and_then(value_text)?,
        _ => return None,
    };
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn first_of(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(items) => items.first(),
        Value::Null => None,
        other => Some(other),
    }
}

/// Itera um campo que pode ser valor único ou array.
fn list<'a>(value: &'a Value, name: &str) -> impl Iterator<Item = &'a Value> + 'a {
    let items: Vec<&'a Value> = match field(value, name) {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => vec![other],
    };
    items.into_iter()
}

/// Aceita "1234.56" e "1.234,56".
fn parse_valor(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if let Ok(v) = raw.parse::<f64>() {
        return Some(v);
    }
    raw.replace('.', "").replace(',', ".").parse::<f64>().ok()
}

/// Datas MNI vêm como `yyyyMMddHHmmss`; convertidas para ISO 8601. Outros
/// formatos são devolvidos como vieram.
fn parse_data_mni(raw: &str) -> String {
    let raw = raw.trim();
    match NaiveDateTime::parse_from_str(raw, "%Y%m%d%H%M%S") {
        Ok(dt) => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_prefers_attribute_then_element() {
        let v = json!({"@numero": "1", "numero": "2"});
        assert_eq!(field_text(&v, "numero").as_deref(), Some("1"));
        let v = json!({"numero": ["3", "4"]});
        assert_eq!(field_text(&v, "numero").as_deref(), Some("3"));
    }

    #[test]
    fn value_text_coerces_scalars() {
        assert_eq!(value_text(&json!(10)).as_deref(), Some("10"));
        assert_eq!(value_text(&json!(true)).as_deref(), Some("true"));
        assert_eq!(value_text(&json!({"#text": " x "})).as_deref(), Some("x"));
        assert_eq!(value_text(&json!("   ")), None);
    }

    #[test]
    fn parse_valor_accepts_both_decimal_styles() {
        assert_eq!(parse_valor("1234.56"), Some(1234.56));
        assert_eq!(parse_valor("1.234,56"), Some(1234.56));
        assert_eq!(parse_valor("abc"), None);
    }

    #[test]
    fn parse_data_mni_converts_compact_timestamp() {
        assert_eq!(parse_data_mni("20240315143000"), "2024-03-15T14:30:00");
        assert_eq!(parse_data_mni("2024-03-15"), "2024-03-15");
    }
}
