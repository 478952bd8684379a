use std::collections::HashSet;

use async_trait::async_trait;
use evalbot_database_interface::{DatabaseError, DbService, Result};
use evalbot_models::{Repository, RepositoryFilter, Review, ReviewCandidate, ReviewFilter};
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use crate::row::{RepositoryRow, ReviewRow};

/// Postgres accepts at most 65535 bind parameters per statement.
const UPSERT_CHUNK_SIZE: usize = 1000;

const REVIEW_MUTABLE_COLUMNS: &[&str] = &[
    "repo_name",
    "pr_number",
    "pr_url",
    "pr_title",
    "pr_review_id",
    "review_comment_id",
    "review_comment_url",
    "original_commit_sha",
    "workflow_version",
    "sentiment",
    "positive_reactions",
    "negative_reactions",
];

/// `LIMIT` / `OFFSET` are `BIGINT`; larger values mean "no bound" anyway.
fn to_sql_count(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

pub struct PostgresDb {
    pool: PgPool,
}

impl PostgresDb {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn wrap_error(e: sqlx::Error) -> DatabaseError {
        if let sqlx::Error::Database(db_error) = &e {
            if let Some(constraint) = db_error.constraint() {
                return DatabaseError::ConstraintViolation {
                    constraint: constraint.into(),
                    message: db_error.message().into(),
                };
            }
        }

        DatabaseError::ImplementationError { source: e.into() }
    }

    fn dedupe_candidates(candidates: Vec<ReviewCandidate>) -> Vec<ReviewCandidate> {
        let mut seen = HashSet::new();
        let mut output: Vec<_> = candidates
            .into_iter()
            .rev()
            .filter(|c| seen.insert(c.ai_review_id.clone()))
            .collect();
        output.reverse();
        output
    }

    fn build_upsert_query(chunk: &[ReviewCandidate]) -> QueryBuilder<'_, Postgres> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            r#"
            INSERT INTO ai_review
            (
                ai_review_id,
                created_at,
                last_updated,
                repo_name,
                pr_number,
                pr_url,
                pr_title,
                pr_review_id,
                review_comment_id,
                review_comment_url,
                original_commit_sha,
                workflow_version,
                sentiment,
                positive_reactions,
                negative_reactions
            )
            "#,
        );

        builder.push_values(chunk, |mut b, candidate| {
            b.push_bind(&candidate.ai_review_id)
                .push_bind(candidate.created_at)
                .push("now()")
                .push_bind(&candidate.repo_name)
                .push_bind(candidate.pr_number as i64)
                .push_bind(&candidate.pr_url)
                .push_bind(&candidate.pr_title)
                .push_bind(candidate.pr_review_id as i64)
                .push_bind(candidate.review_comment_id as i64)
                .push_bind(&candidate.review_comment_url)
                .push_bind(&candidate.original_commit_sha)
                .push_bind(&candidate.workflow_version)
                .push_bind(candidate.sentiment.map(|s| s.to_str()))
                .push_bind(candidate.positive_reactions as i64)
                .push_bind(candidate.negative_reactions as i64);
        });

        builder.push(" ON CONFLICT (ai_review_id) DO UPDATE SET ");
        for column in REVIEW_MUTABLE_COLUMNS {
            builder.push(format!("{column} = EXCLUDED.{column}, "));
        }
        builder.push(
            "last_updated = GREATEST(now(), ai_review.last_updated + INTERVAL '1 microsecond')",
        );

        builder
    }
}

#[async_trait]
impl DbService for PostgresDb {
    #[tracing::instrument(skip(self))]
    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1;")
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn repositories_create(&self, instance: Repository) -> Result<Repository> {
        instance.path()?;

        let row = sqlx::query_as::<_, RepositoryRow>(
            r#"
            INSERT INTO repository
            (
                repo_name,
                enabled,
                team,
                subscribed_at
            )
            VALUES
            (
                $1,
                $2,
                $3,
                $4
            )
            RETURNING *;
        "#,
        )
        .bind(&instance.repo_name)
        .bind(instance.enabled)
        .bind(&instance.team)
        .bind(instance.subscribed_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let duplicate = matches!(
                &e,
                sqlx::Error::Database(db_error) if db_error.is_unique_violation()
            );

            if duplicate {
                DatabaseError::RepositoryAlreadyExists(instance.repo_name.clone())
            } else {
                Self::wrap_error(e)
            }
        })?;

        Ok(row.into())
    }

    #[tracing::instrument(skip(self))]
    async fn repositories_all(&self) -> Result<Vec<Repository>> {
        self.repositories_list(RepositoryFilter::default()).await
    }

    #[tracing::instrument(skip(self))]
    async fn repositories_list(&self, filter: RepositoryFilter) -> Result<Vec<Repository>> {
        let rows = sqlx::query_as::<_, RepositoryRow>(
            r#"
                SELECT *
                FROM repository
                WHERE ($1 = FALSE OR enabled = TRUE)
                ORDER BY repo_name
                LIMIT $2
                OFFSET $3
            "#,
        )
        .bind(filter.enabled_only)
        .bind(filter.pagination.limit.map(to_sql_count))
        .bind(to_sql_count(filter.pagination.skip))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn repositories_get(&self, repo_name: &str) -> Result<Option<Repository>> {
        let row = sqlx::query_as::<_, RepositoryRow>(
            r#"
                SELECT *
                FROM repository
                WHERE repo_name = $1
            "#,
        )
        .bind(repo_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        Ok(row.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    async fn repositories_set_enabled(&self, repo_name: &str, value: bool) -> Result<Repository> {
        let row = sqlx::query_as::<_, RepositoryRow>(
            r#"
                UPDATE repository
                SET enabled = $1
                WHERE repo_name = $2
                RETURNING *
            "#,
        )
        .bind(value)
        .bind(repo_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        row.map(Into::into)
            .ok_or_else(|| DatabaseError::UnknownRepository(repo_name.into()))
    }

    #[tracing::instrument(skip(self))]
    async fn repositories_set_team(
        &self,
        repo_name: &str,
        team: Option<String>,
    ) -> Result<Repository> {
        let row = sqlx::query_as::<_, RepositoryRow>(
            r#"
                UPDATE repository
                SET team = $1
                WHERE repo_name = $2
                RETURNING *
            "#,
        )
        .bind(team)
        .bind(repo_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        row.map(Into::into)
            .ok_or_else(|| DatabaseError::UnknownRepository(repo_name.into()))
    }

    #[tracing::instrument(skip(self, candidates), fields(count = candidates.len()))]
    async fn reviews_upsert(&self, candidates: Vec<ReviewCandidate>) -> Result<usize> {
        if candidates.is_empty() {
            return Ok(0);
        }

        let count = candidates.len();
        for candidate in &candidates {
            candidate.validate()?;
        }

        let candidates = Self::dedupe_candidates(candidates);
        let mut transaction = self.pool.begin().await.map_err(Self::wrap_error)?;
        for chunk in candidates.chunks(UPSERT_CHUNK_SIZE) {
            Self::build_upsert_query(chunk)
                .build()
                .execute(&mut *transaction)
                .await
                .map_err(Self::wrap_error)?;
        }
        transaction.commit().await.map_err(Self::wrap_error)?;

        Ok(count)
    }

    #[tracing::instrument(skip(self))]
    async fn reviews_all(&self) -> Result<Vec<Review>> {
        self.reviews_list(ReviewFilter::default()).await
    }

    #[tracing::instrument(skip(self))]
    async fn reviews_list(&self, filter: ReviewFilter) -> Result<Vec<Review>> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            r#"
                SELECT *
                FROM ai_review
                WHERE ($1::varchar IS NULL OR sentiment = $1)
                AND ($2::varchar IS NULL OR repo_name = $2)
                ORDER BY created_at DESC, ai_review_id
                LIMIT $3
                OFFSET $4
            "#,
        )
        .bind(filter.sentiment.map(|s| s.to_str()))
        .bind(filter.repo_name)
        .bind(filter.pagination.limit.map(to_sql_count))
        .bind(to_sql_count(filter.pagination.skip))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn reviews_get(&self, ai_review_id: &str) -> Result<Option<Review>> {
        let row = sqlx::query_as::<_, ReviewRow>(
            r#"
                SELECT *
                FROM ai_review
                WHERE ai_review_id = $1
            "#,
        )
        .bind(ai_review_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        Ok(row.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    async fn reviews_count(&self) -> Result<u64> {
        let count: i64 = sqlx::query("SELECT COUNT(*) FROM ai_review;")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?
            .get(0);

        Ok(count as u64)
    }
}
