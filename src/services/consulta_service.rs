use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, Pool, Sqlite};
use uuid::Uuid;

use crate::models::consulta_model::{
    ConsultaRecord, ConsultaStatusResponse, ListConsultasResponse,
};
use crate::services::page_offset;

#[derive(Clone, Debug)]
pub struct ConsultaService {
    db_pool: Pool<Sqlite>,
}

#[derive(FromRow)]
struct ConsultaRow {
    id: String,
    numero: String,
    status: String,
    error_message: Option<String>,
    processo_id: Option<String>,
    created_at: String,
    updated_at: String,
}

impl ConsultaService {
    pub fn new(db_pool: Pool<Sqlite>) -> Self {
        ConsultaService { db_pool }
    }

    /// Corre as migrações com sqlx (consultas, processos, partes)
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.db_pool)
            .await
            .context("Falha ao rodar migrações")?;
        Ok(())
    }

    /// Registra a consulta com estado "pending" e devolve o id
    pub async fn create_consulta(&self, numero: &str) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO consultas (
                id, numero, status, error_message, processo_id, created_at, updated_at
            )
            VALUES (?1, ?2, 'pending', NULL, NULL, ?3, ?3)
            "#,
        )
        .bind(&id)
        .bind(numero)
        .bind(&now)
        .execute(&self.db_pool)
        .await
        .context("Falha ao inserir consulta")?;

        Ok(id)
    }

    /// Atualiza estado e erro
    pub async fn update_status(
        &self,
        id: &str,
        status: &str,
        error_message: Option<&str>,
    ) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            r#"
            UPDATE consultas
            SET status = ?2,
                error_message = ?3,
                updated_at = ?4
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(error_message)
        .bind(&now)
        .execute(&self.db_pool)
        .await
        .context("Falha ao atualizar consulta")?;

        if result.rows_affected() == 0 {
            return Err(anyhow!("Consulta {} não encontrada", id));
        }
        Ok(())
    }

    pub async fn mark_done(&self, id: &str, processo_id: &str) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            r#"
            UPDATE consultas
            SET status = 'done',
                error_message = NULL,
                processo_id = ?2,
                updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(processo_id)
        .bind(&now)
        .execute(&self.db_pool)
        .await
        .context("Falha ao concluir consulta")?;

        Ok(())
    }

    pub async fn mark_failed(&self, id: &str, error: &str) -> Result<()> {
        self.update_status(id, "failed", Some(error)).await
    }

    /// Obtém a info de uma consulta
    pub async fn get_consulta(&self, id: &str) -> Result<ConsultaRecord> {
        let row = sqlx::query_as::<_, ConsultaRow>(
            r#"
            SELECT id, numero, status, error_message, processo_id, created_at, updated_at
            FROM consultas
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await
        .context("Falha ao buscar consulta")?
        .ok_or_else(|| anyhow!("Consulta {} não encontrada", id))?;

        Ok(ConsultaRecord {
            id: row.id,
            numero: row.numero,
            status: row.status,
            error_message: row.error_message,
            processo_id: row.processo_id,
            created_at: row.created_at.parse::<DateTime<Utc>>()?,
            updated_at: row.updated_at.parse::<DateTime<Utc>>()?,
        })
    }

    /// Lista consultas com paginação (mais recentes primeiro)
    pub async fn list_consultas(&self, page: u64, page_size: u64) -> Result<ListConsultasResponse> {
        let page = page.max(1);
        let page_size = page_size.clamp(1, 100);
        let offset = page_offset(page, page_size);

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM consultas")
            .fetch_one(&self.db_pool)
            .await?;

        let rows = sqlx::query_as::<_, ConsultaRow>(
            r#"
            SELECT id, numero, status, error_message, processo_id, created_at, updated_at
            FROM consultas
            ORDER BY created_at DESC
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(page_size as i64)
        .bind(offset)
        .fetch_all(&self.db_pool)
        .await?;

        let items = rows
            .into_iter()
            .map(|r| ConsultaStatusResponse {
                id: r.id,
                numero: r.numero,
                status: r.status,
                error_message: r.error_message,
                processo_id: r.processo_id,
                created_at: r.created_at,
                updated_at: r.updated_at,
            })
            .collect();

        Ok(ListConsultasResponse {
            total: total as u64,
            page,
            page_size,
            items,
        })
    }
}
