//! services/cnj_service.rs
//! Número único de processo (CNJ): normalização, decomposição e dígitos verificadores.
//!
//! Todo produtor do formato (exibição, normalização do banco, mapeamento PROJUDI)
//! passa por `format_cnj_number`, para que o resultado seja idêntico em todos.

use anyhow::{anyhow, Result};

use crate::models::cnj_model::{CnjNumber, Segmento, Tribunal};

/// Quantidade de dígitos de um número CNJ
pub const CNJ_DIGITS: usize = 20;

/// UFs na ordem dos códigos TR da Justiça Estadual (01 = AC ... 27 = TO).
const UF_POR_TR: [&str; 27] = [
    "AC", "AL", "AP", "AM", "BA", "CE", "DF", "ES", "GO", "MA", "MT", "MS", "MG", "PA", "PB",
    "PR", "PE", "PI", "RJ", "RN", "RS", "RO", "RR", "SC", "SE", "SP", "TO",
];

/// Mantém apenas os dígitos ASCII.
pub fn only_digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Remove tudo que não é dígito e, se sobrarem exatamente 20, aplica a máscara
/// `NNNNNNN-DD.AAAA.J.TT.OOOO`. Qualquer outra entrada volta intacta.
pub fn format_cnj_number(value: &str) -> String {
    let digits = only_digits(value);
    if digits.len() != CNJ_DIGITS {
        return value.to_string();
    }

    format!(
        "{}-{}.{}.{}.{}.{}",
        &digits[0..7],
        &digits[7..9],
        &digits[9..13],
        &digits[13..14],
        &digits[14..16],
        &digits[16..20]
    )
}

/// true se `value` já está exatamente na forma pontuada.
pub fn is_canonical(value: &str) -> bool {
    value.len() == 25
        && only_digits(value).len() == CNJ_DIGITS
        && format_cnj_number(value) == value
}

impl CnjNumber {
    /// Decompõe um número (pontuado ou não). Falha se não houver 20 dígitos.
    pub fn parse(value: &str) -> Result<Self> {
        let digits = only_digits(value);
        if digits.len() != CNJ_DIGITS {
            return Err(anyhow!(
                "Número CNJ inválido: esperados {} dígitos, encontrados {} em {:?}",
                CNJ_DIGITS,
                digits.len(),
                value
            ));
        }

        Ok(CnjNumber {
            sequencial: digits[0..7].to_string(),
            digito_verificador: digits[7..9].to_string(),
            ano: digits[9..13].to_string(),
            segmento: digits[13..14].to_string(),
            tribunal: digits[14..16].to_string(),
            origem: digits[16..20].to_string(),
        })
    }

    pub fn digits(&self) -> String {
        format!(
            "{}{}{}{}{}{}",
            self.sequencial,
            self.digito_verificador,
            self.ano,
            self.segmento,
            self.tribunal,
            self.origem
        )
    }

    pub fn formatted(&self) -> String {
        format_cnj_number(&self.digits())
    }

    /// DV = 98 - (NNNNNNN AAAA J TR OOOO 00 mod 97)  (ISO 7064, mod 97-10)
    pub fn expected_check_digits(&self) -> String {
        let base = format!(
            "{}{}{}{}{}00",
            self.sequencial, self.ano, self.segmento, self.tribunal, self.origem
        );
        let dv = 98 - mod97(&base);
        format!("{:02}", dv)
    }

    /// Número completo reordenado (N AAAA J TR OOOO DD) deve dar resto 1.
    pub fn has_valid_check_digits(&self) -> bool {
        let reordered = format!(
            "{}{}{}{}{}{}",
            self.sequencial,
            self.ano,
            self.segmento,
            self.tribunal,
            self.origem,
            self.digito_verificador
        );
        mod97(&reordered) == 1
    }

    pub fn segmento(&self) -> Segmento {
        match self.segmento.as_str() {
            "1" => Segmento::SupremoTribunalFederal,
            "2" => Segmento::ConselhoNacionalDeJustica,
            "3" => Segmento::SuperiorTribunalDeJustica,
            "4" => Segmento::JusticaFederal,
            "5" => Segmento::JusticaDoTrabalho,
            "6" => Segmento::JusticaEleitoral,
            "7" => Segmento::JusticaMilitarDaUniao,
            "8" => Segmento::JusticaEstadual,
            "9" => Segmento::JusticaMilitarEstadual,
            _ => Segmento::Desconhecido,
        }
    }

    /// Tribunal deduzido de J + TR. `None` quando o código não é conhecido.
    pub fn tribunal(&self) -> Option<Tribunal> {
        let codigo = self.tribunal.clone();
        let tr: usize = codigo.parse().ok()?;
        let uf = uf_por_codigo(tr);

        let (sigla, uf) = match self.segmento() {
            Segmento::SupremoTribunalFederal => ("STF".to_string(), None),
            Segmento::ConselhoNacionalDeJustica => ("CNJ".to_string(), None),
            Segmento::SuperiorTribunalDeJustica => ("STJ".to_string(), None),
            Segmento::JusticaFederal if (1..=6).contains(&tr) => (format!("TRF{}", tr), None),
            Segmento::JusticaDoTrabalho if (1..=24).contains(&tr) => (format!("TRT{}", tr), None),
            Segmento::JusticaEleitoral => {
                let uf = uf?;
                (format!("TRE-{}", uf), Some(uf.to_string()))
            }
            Segmento::JusticaEstadual => {
                let uf = uf?;
                let sigla = if uf == "DF" {
                    "TJDFT".to_string()
                } else {
                    format!("TJ{}", uf)
                };
                (sigla, Some(uf.to_string()))
            }
            Segmento::JusticaMilitarEstadual => {
                let uf = uf?;
                (format!("TJM-{}", uf), Some(uf.to_string()))
            }
            Segmento::JusticaMilitarDaUniao => ("STM".to_string(), None),
            _ => return None,
        };

        Some(Tribunal { sigla, codigo, uf })
    }
}

fn uf_por_codigo(tr: usize) -> Option<&'static str> {
    if tr == 0 {
        return None;
    }
    UF_POR_TR.get(tr - 1).copied()
}

/// Resto da divisão por 97 de uma string de dígitos arbitrariamente longa.
fn mod97(digits: &str) -> u32 {
    digits
        .bytes()
        .filter(u8::is_ascii_digit)
        .fold(0u32, |acc, b| (acc * 10 + u32::from(b - b'0')) % 97)
}
