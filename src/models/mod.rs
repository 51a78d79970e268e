//! models/mod.rs
//! Módulo raiz para modelos/estruturas compartilhadas.

pub mod cnj_model;
pub mod consulta_model;
pub mod processo_model;
pub mod projudi_model;
