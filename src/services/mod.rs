//! services/mod.rs
//! Módulo que agrupa os "serviços" ou "camadas de negócio" da aplicação.

pub mod cnj_service;
pub mod consulta_service;
pub mod mni_service;
pub mod processo_service;
pub mod projudi_service;
pub mod sync_service;
pub mod text_service;
pub mod xml_service;

/// OFFSET de uma página (1-based). Páginas além do alcance de `i64` caem no
/// fim da tabela e voltam vazias.
pub fn page_offset(page: u64, page_size: u64) -> i64 {
    page.saturating_sub(1)
        .checked_mul(page_size)
        .and_then(|offset| i64::try_from(offset).ok())
        .unwrap_or(i64::MAX)
}
