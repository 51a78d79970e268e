//! services/text_service.rs
//! Normalização de rótulos vindos de sistemas externos (polo, órgão, instância).

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Remove acentos (NFD sem marcas combinantes), converte para maiúsculas e
/// colapsa os espaços. `"  pólo  Passivo "` -> `"POLO PASSIVO"`.
pub fn normalize_label(value: &str) -> String {
    let stripped: String = value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_uppercase();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents_and_uppercases() {
        assert_eq!(normalize_label("Réu"), "REU");
        assert_eq!(normalize_label("Câmara Cível"), "CAMARA CIVEL");
        assert_eq!(normalize_label("  pólo   passivo "), "POLO PASSIVO");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(normalize_label(""), "");
        assert_eq!(normalize_label("   "), "");
    }
}
