//! config/mod.rs
//! Configurações carregadas do ambiente (.env).

pub mod app_config;
pub mod projudi_config;

/// Lê uma variável de ambiente e tenta convertê-la; em caso de ausência
/// ou valor inválido devolve o default.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                log::warn!("Valor inválido em {}={:?}, usando o padrão", key, raw);
                default
            }
        },
        Err(_) => default,
    }
}
