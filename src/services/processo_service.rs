//! services/processo_service.rs
//! Persistência dos processos importados do PROJUDI e normalização dos números
//! já gravados no banco.

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use sqlx::{FromRow, Pool, Sqlite};
use uuid::Uuid;

use crate::models::processo_model::{
    ListProcessosResponse, NormalizationReport, ParteRecord, ProcessoMapeado, ProcessoRecord,
    ProcessoSummary,
};
use crate::services::cnj_service::format_cnj_number;
use crate::services::page_offset;

#[derive(Clone, Debug)]
pub struct ProcessoService {
    db_pool: Pool<Sqlite>,
}

#[derive(FromRow)]
struct ProcessoRow {
    id: String,
    numero: String,
    classe: Option<String>,
    tribunal: Option<String>,
    orgao_julgador: Option<String>,
    instancia: Option<String>,
    valor_causa: Option<f64>,
    data_ajuizamento: Option<String>,
    dados: Option<String>,
    created_at: String,
    updated_at: String,
}

#[derive(FromRow)]
struct ParteRow {
    id: String,
    nome: String,
    documento: Option<String>,
    tipo_pessoa: Option<String>,
    polo: String,
}

impl ProcessoService {
    pub fn new(db_pool: Pool<Sqlite>) -> Self {
        ProcessoService { db_pool }
    }

    /// Insere ou atualiza o processo pelo número canônico. A lista de partes é
    /// substituída pela do mapeamento. Devolve o id do processo.
    pub async fn upsert_processo(&self, processo: &ProcessoMapeado) -> Result<String> {
        let numero = format_cnj_number(&processo.numero);
        let now = Utc::now().to_rfc3339();
        let dados = serde_json::to_string(processo).context("Falha serializando processo")?;
        let tribunal = processo.tribunal.as_ref().map(|t| t.sigla.clone());
        let orgao = processo.orgao_julgador.as_ref().and_then(|o| o.nome.clone());
        let instancia = processo
            .orgao_julgador
            .as_ref()
            .map(|o| o.instancia.as_str().to_string());

        let mut tx = self.db_pool.begin().await?;

        let existing: Option<String> =
            sqlx::query_scalar("SELECT id FROM processos WHERE numero = ?1")
                .bind(&numero)
                .fetch_optional(&mut *tx)
                .await
                .context("Falha ao buscar processo existente")?;

        let processo_id = match existing {
            Some(id) => {
                sqlx::query(
                    r#"
                    UPDATE processos
                    SET classe = ?2,
                        tribunal = ?3,
                        orgao_julgador = ?4,
                        instancia = ?5,
                        valor_causa = ?6,
                        data_ajuizamento = ?7,
                        dados = ?8,
                        updated_at = ?9
                    WHERE id = ?1
                    "#,
                )
                .bind(&id)
                .bind(&processo.classe)
                .bind(&tribunal)
                .bind(&orgao)
                .bind(&instancia)
                .bind(processo.valor_causa)
                .bind(&processo.data_ajuizamento)
                .bind(&dados)
                .bind(&now)
                .execute(&mut *tx)
                .await
                .context("Falha ao atualizar processo")?;

                sqlx::query("DELETE FROM partes WHERE processo_id = ?1")
                    .bind(&id)
                    .execute(&mut *tx)
                    .await
                    .context("Falha ao limpar partes")?;
                id
            }
            None => {
                let id = Uuid::new_v4().to_string();
                sqlx::query(
                    r#"
                    INSERT INTO processos (
                        id, numero, classe, tribunal, orgao_julgador, instancia,
                        valor_causa, data_ajuizamento, dados, created_at, updated_at
                    )
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)
                    "#,
                )
                .bind(&id)
                .bind(&numero)
                .bind(&processo.classe)
                .bind(&tribunal)
                .bind(&orgao)
                .bind(&instancia)
                .bind(processo.valor_causa)
                .bind(&processo.data_ajuizamento)
                .bind(&dados)
                .bind(&now)
                .execute(&mut *tx)
                .await
                .context("Falha ao inserir processo")?;
                id
            }
        };

        for parte in &processo.partes {
            sqlx::query(
                r#"
                INSERT INTO partes (id, processo_id, nome, documento, tipo_pessoa, polo)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&processo_id)
            .bind(&parte.nome)
            .bind(&parte.documento)
            .bind(&parte.tipo_pessoa)
            .bind(parte.polo.as_str())
            .execute(&mut *tx)
            .await
            .context("Falha ao inserir parte")?;
        }

        tx.commit().await?;

        log::info!(
            "(upsert_processo) Processo {} gravado (id={}, {} partes)",
            numero,
            processo_id,
            processo.partes.len()
        );
        Ok(processo_id)
    }

    /// Busca pelo número (qualquer pontuação). Também encontra registros
    /// antigos que ainda não passaram pela normalização.
    pub async fn get_processo(&self, numero: &str) -> Result<ProcessoRecord> {
        let raw = numero.trim();
        let canonical = format_cnj_number(raw);

        let row = sqlx::query_as::<_, ProcessoRow>(
            r#"
            SELECT id, numero, classe, tribunal, orgao_julgador, instancia,
                   valor_causa, data_ajuizamento, dados, created_at, updated_at
            FROM processos
            WHERE numero = ?1 OR numero = ?2
            ORDER BY CASE WHEN numero = ?1 THEN 0 ELSE 1 END
            LIMIT 1
            "#,
        )
        .bind(&canonical)
        .bind(raw)
        .fetch_optional(&self.db_pool)
        .await
        .context("Falha ao buscar processo")?
        .ok_or_else(|| anyhow!("Processo {} não encontrado", canonical))?;

        let partes = sqlx::query_as::<_, ParteRow>(
            r#"
            SELECT id, nome, documento, tipo_pessoa, polo
            FROM partes
            WHERE processo_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(&row.id)
        .fetch_all(&self.db_pool)
        .await
        .context("Falha ao buscar partes")?;

        let dados = row
            .dados
            .as_deref()
            .and_then(|d| match serde_json::from_str::<ProcessoMapeado>(d) {
                Ok(p) => Some(p),
                Err(e) => {
                    log::warn!("(get_processo) 'dados' ilegível para {}: {}", row.numero, e);
                    None
                }
            });

        Ok(ProcessoRecord {
            id: row.id,
            numero: row.numero,
            classe: row.classe,
            tribunal: row.tribunal,
            orgao_julgador: row.orgao_julgador,
            instancia: row.instancia,
            valor_causa: row.valor_causa,
            data_ajuizamento: row.data_ajuizamento,
            partes: partes
                .into_iter()
                .map(|p| ParteRecord {
                    id: p.id,
                    nome: p.nome,
                    documento: p.documento,
                    tipo_pessoa: p.tipo_pessoa,
                    polo: p.polo,
                })
                .collect(),
            dados,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    /// Lista processos com paginação (atualizados recentemente primeiro)
    pub async fn list_processos(&self, page: u64, page_size: u64) -> Result<ListProcessosResponse> {
        let page = page.max(1);
        let page_size = page_size.clamp(1, 100);
        let offset = page_offset(page, page_size);

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM processos")
            .fetch_one(&self.db_pool)
            .await?;

        let rows = sqlx::query_as::<_, ProcessoRow>(
            r#"
            SELECT id, numero, classe, tribunal, orgao_julgador, instancia,
                   valor_causa, data_ajuizamento, NULL AS dados, created_at, updated_at
            FROM processos
            ORDER BY updated_at DESC, numero
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(page_size as i64)
        .bind(offset)
        .fetch_all(&self.db_pool)
        .await?;

        let items = rows
            .into_iter()
            .map(|r| ProcessoSummary {
                id: r.id,
                numero: r.numero,
                classe: r.classe,
                tribunal: r.tribunal,
                instancia: r.instancia,
                updated_at: r.updated_at,
            })
            .collect();

        Ok(ListProcessosResponse {
            total: total as u64,
            page,
            page_size,
            items,
        })
    }

    /// Reescreve todo `numero` gravado na forma canônica. Uma reescrita que
    /// colidiria com outro registro já canônico é reportada e não aplicada.
    pub async fn normalize_stored_numbers(&self) -> Result<NormalizationReport> {
        let mut tx = self.db_pool.begin().await?;

        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT id, numero FROM processos ORDER BY created_at, id")
                .fetch_all(&mut *tx)
                .await
                .context("Falha ao ler números de processo")?;

        let mut report = NormalizationReport::default();
        for (id, numero) in rows {
            report.scanned += 1;
            let canonical = format_cnj_number(&numero);
            if canonical == numero {
                report.unchanged += 1;
                continue;
            }

            let taken: Option<String> =
                sqlx::query_scalar("SELECT id FROM processos WHERE numero = ?1 AND id <> ?2")
                    .bind(&canonical)
                    .bind(&id)
                    .fetch_optional(&mut *tx)
                    .await?;
            if taken.is_some() {
                log::warn!(
                    "(normalize_stored_numbers) {:?} colide com {} já existente",
                    numero,
                    canonical
                );
                report.conflicts.push(numero);
                continue;
            }

            sqlx::query("UPDATE processos SET numero = ?2, updated_at = ?3 WHERE id = ?1")
                .bind(&id)
                .bind(&canonical)
                .bind(Utc::now().to_rfc3339())
                .execute(&mut *tx)
                .await
                .context("Falha ao normalizar número")?;
            report.updated += 1;
        }

        tx.commit().await?;

        log::info!(
            "(normalize_stored_numbers) {} lidos, {} atualizados, {} já canônicos, {} conflitos",
            report.scanned,
            report.updated,
            report.unchanged,
            report.conflicts.len()
        );
        Ok(report)
    }
}
