//! PostgreSQL Repository Implementation
//!
//! Polls live in two tables: `polls` and `poll_options` keyed by
//! `(poll_id, option_index)`. The index column preserves the insertion
//! order the voting form addresses options by, and gives the vote path
//! a single row to increment atomically.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use kernel::id::{PollId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::poll::{Poll, PollOption};
use crate::domain::repository::PollRepository;
use crate::domain::value_object::{option_name::OptionName, poll_title::PollTitle};
use crate::error::{PollError, PollResult};

/// PostgreSQL-backed poll repository
#[derive(Clone)]
pub struct PgPollRepository {
    pool: PgPool,
}

impl PgPollRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load options for a set of polls, grouped by poll, in option order
    async fn load_options(
        &self,
        poll_ids: &[Uuid],
    ) -> PollResult<HashMap<Uuid, Vec<PollOption>>> {
        let rows = sqlx::query_as::<_, PollOptionRow>(
            r#"
            SELECT
                poll_id,
                option_index,
                option_name,
                votes
            FROM poll_options
            WHERE poll_id = ANY($1)
            ORDER BY poll_id, option_index
            "#,
        )
        .bind(poll_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<PollOption>> = HashMap::new();
        for row in rows {
            let option = row.clone().into_option()?;
            grouped.entry(row.poll_id).or_default().push(option);
        }

        Ok(grouped)
    }

    /// Assemble full polls from poll rows plus their options
    async fn assemble(&self, rows: Vec<PollRow>) -> PollResult<Vec<Poll>> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.poll_id).collect();
        let mut options = self.load_options(&ids).await?;

        rows.into_iter()
            .map(|row| {
                let opts = options.remove(&row.poll_id).unwrap_or_default();
                row.into_poll(opts)
            })
            .collect()
    }
}

impl PollRepository for PgPollRepository {
    async fn create(&self, poll: &Poll) -> PollResult<()> {
        // Poll and options land together or not at all
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO polls (
                poll_id,
                title,
                created_by,
                created_at
            ) VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(poll.poll_id.as_uuid())
        .bind(poll.title.as_str())
        .bind(poll.created_by.as_uuid())
        .bind(poll.created_at)
        .execute(&mut *tx)
        .await?;

        for (index, option) in poll.options.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO poll_options (
                    poll_id,
                    option_index,
                    option_name,
                    votes
                ) VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(poll.poll_id.as_uuid())
            .bind(index as i32)
            .bind(option.name.as_str())
            .bind(option.votes)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    async fn find_by_id(&self, poll_id: &PollId) -> PollResult<Option<Poll>> {
        let row = sqlx::query_as::<_, PollRow>(
            r#"
            SELECT
                poll_id,
                title,
                created_by,
                created_at
            FROM polls
            WHERE poll_id = $1
            "#,
        )
        .bind(poll_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut options = self.load_options(&[row.poll_id]).await?;
        let opts = options.remove(&row.poll_id).unwrap_or_default();

        Ok(Some(row.into_poll(opts)?))
    }

    async fn list_all(&self) -> PollResult<Vec<Poll>> {
        let rows = sqlx::query_as::<_, PollRow>(
            r#"
            SELECT
                poll_id,
                title,
                created_by,
                created_at
            FROM polls
            ORDER BY created_at DESC, poll_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        self.assemble(rows).await
    }

    async fn list_by_owner(&self, owner: &UserId) -> PollResult<Vec<Poll>> {
        let rows = sqlx::query_as::<_, PollRow>(
            r#"
            SELECT
                poll_id,
                title,
                created_by,
                created_at
            FROM polls
            WHERE created_by = $1
            ORDER BY created_at DESC, poll_id
            "#,
        )
        .bind(owner.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        self.assemble(rows).await
    }

    async fn increment_vote(&self, poll_id: &PollId, option_index: usize) -> PollResult<bool> {
        // One atomic counter bump on one row; concurrent voters all land
        let updated = sqlx::query(
            r#"
            UPDATE poll_options
            SET votes = votes + 1
            WHERE poll_id = $1 AND option_index = $2
            "#,
        )
        .bind(poll_id.as_uuid())
        .bind(option_index as i32)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn append_option(&self, poll_id: &PollId, name: &OptionName) -> PollResult<usize> {
        // Compute the next index and insert in one statement
        let index = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO poll_options (poll_id, option_index, option_name, votes)
            SELECT $1, COALESCE(MAX(option_index) + 1, 0), $2, 0
            FROM poll_options
            WHERE poll_id = $1
            RETURNING option_index
            "#,
        )
        .bind(poll_id.as_uuid())
        .bind(name.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // FK violation: the poll vanished under us
            if is_foreign_key_violation(&e) {
                PollError::NotFound
            } else {
                PollError::Database(e)
            }
        })?;

        Ok(index as usize)
    }

    async fn delete(&self, poll_id: &PollId) -> PollResult<bool> {
        // Options go with the poll via ON DELETE CASCADE
        let deleted = sqlx::query("DELETE FROM polls WHERE poll_id = $1")
            .bind(poll_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

/// Whether a sqlx error is a foreign-key violation (PostgreSQL 23503)
fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(
        err.as_database_error().and_then(|e| e.code()),
        Some(code) if code == "23503"
    )
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct PollRow {
    poll_id: Uuid,
    title: String,
    created_by: Uuid,
    created_at: DateTime<Utc>,
}

impl PollRow {
    fn into_poll(self, options: Vec<PollOption>) -> PollResult<Poll> {
        let title = PollTitle::from_db(&self.title)
            .map_err(|e| PollError::Internal(format!("Invalid title: {}", e)))?;

        Ok(Poll {
            poll_id: PollId::from_uuid(self.poll_id),
            title,
            options,
            created_by: UserId::from_uuid(self.created_by),
            created_at: self.created_at,
        })
    }
}

#[derive(Clone, sqlx::FromRow)]
struct PollOptionRow {
    poll_id: Uuid,
    #[allow(dead_code)]
    option_index: i32,
    option_name: String,
    votes: i64,
}

impl PollOptionRow {
    fn into_option(self) -> PollResult<PollOption> {
        let name = OptionName::from_db(&self.option_name)
            .map_err(|e| PollError::Internal(format!("Invalid option name: {}", e)))?;

        Ok(PollOption {
            name,
            votes: self.votes,
        })
    }
}
