//! services/sync_service.rs
//! Importação de um processo: registra a consulta, chama o PROJUDI, grava o
//! resultado e fecha a consulta como "done" ou "failed".

use anyhow::Result;

use crate::models::processo_model::ProcessoMapeado;
use crate::services::cnj_service::format_cnj_number;
use crate::services::consulta_service::ConsultaService;
use crate::services::processo_service::ProcessoService;
use crate::services::projudi_service::ProjudiService;

#[derive(Clone)]
pub struct SyncService {
    projudi_service: ProjudiService,
    consulta_service: ConsultaService,
    processo_service: ProcessoService,
}

/// Resultado de uma importação bem-sucedida
#[derive(Debug, Clone)]
pub struct Importacao {
    pub consulta_id: String,
    pub processo_id: String,
    pub processo: ProcessoMapeado,
}

/// Falha de importação, com a consulta já marcada como "failed"
#[derive(Debug)]
pub struct ImportacaoError {
    pub consulta_id: String,
    pub error: anyhow::Error,
}

impl std::fmt::Display for ImportacaoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "consulta {}: {:#}", self.consulta_id, self.error)
    }
}

impl std::error::Error for ImportacaoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.error)
    }
}

impl SyncService {
    pub fn new(
        projudi_service: ProjudiService,
        consulta_service: ConsultaService,
        processo_service: ProcessoService,
    ) -> Self {
        Self {
            projudi_service,
            consulta_service,
            processo_service,
        }
    }

    pub async fn importar_processo(
        &self,
        numero: &str,
    ) -> Result<Importacao, ImportacaoError> {
        let numero = format_cnj_number(numero.trim());

        // 1) consulta -> pending
        let consulta_id = self
            .consulta_service
            .create_consulta(&numero)
            .await
            .map_err(|error| ImportacaoError {
                consulta_id: String::new(),
                error,
            })?;

        log::info!(
            "(importar_processo) Consulta {} criada para {}",
            consulta_id,
            numero
        );

        match self.run(&consulta_id, &numero).await {
            Ok((processo_id, processo)) => Ok(Importacao {
                consulta_id,
                processo_id,
                processo,
            }),
            Err(error) => {
                let msg = format!("{:#}", error);
                log::error!("(importar_processo) Consulta {} falhou: {}", consulta_id, msg);
                if let Err(e) = self.consulta_service.mark_failed(&consulta_id, &msg).await {
                    log::error!(
                        "(importar_processo) Não foi possível marcar {} como failed: {:?}",
                        consulta_id,
                        e
                    );
                }
                Err(ImportacaoError { consulta_id, error })
            }
        }
    }

    async fn run(&self, consulta_id: &str, numero: &str) -> Result<(String, ProcessoMapeado)> {
        // 2) running
        self.consulta_service
            .update_status(consulta_id, "running", None)
            .await?;

        // 3) PROJUDI
        let processo = self.projudi_service.consultar_processo(numero).await?;

        // 4) gravar e concluir
        let processo_id = self.processo_service.upsert_processo(&processo).await?;
        self.consulta_service
            .mark_done(consulta_id, &processo_id)
            .await?;

        log::info!(
            "(importar_processo) Consulta {} concluída (processo_id={})",
            consulta_id,
            processo_id
        );
        Ok((processo_id, processo))
    }
}
