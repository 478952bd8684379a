use evalbot_models::{Repository, Review};
use sqlx::{postgres::PgRow, FromRow, Row};

use crate::fields::SentimentDecode;

pub(crate) struct RepositoryRow(Repository);
pub(crate) struct ReviewRow(Review);

impl From<RepositoryRow> for Repository {
    fn from(r: RepositoryRow) -> Self {
        r.0
    }
}

impl From<ReviewRow> for Review {
    fn from(r: ReviewRow) -> Self {
        r.0
    }
}

impl<'r> FromRow<'r, PgRow> for RepositoryRow {
    fn from_row(row: &'r PgRow) -> core::result::Result<Self, sqlx::Error> {
        Ok(Self(Repository {
            repo_name: row.try_get("repo_name")?,
            enabled: row.try_get("enabled")?,
            team: row.try_get("team")?,
            subscribed_at: row.try_get("subscribed_at")?,
        }))
    }
}

impl<'r> FromRow<'r, PgRow> for ReviewRow {
    fn from_row(row: &'r PgRow) -> core::result::Result<Self, sqlx::Error> {
        Ok(Self(Review {
            ai_review_id: row.try_get("ai_review_id")?,
            repo_name: row.try_get("repo_name")?,
            pr_number: row.try_get::<i64, _>("pr_number")? as u64,
            pr_url: row.try_get("pr_url")?,
            pr_title: row.try_get("pr_title")?,
            pr_review_id: row.try_get::<i64, _>("pr_review_id")? as u64,
            review_comment_id: row.try_get::<i64, _>("review_comment_id")? as u64,
            review_comment_url: row.try_get("review_comment_url")?,
            original_commit_sha: row.try_get("original_commit_sha")?,
            workflow_version: row.try_get("workflow_version")?,
            created_at: row.try_get("created_at")?,
            sentiment: row
                .try_get::<Option<SentimentDecode>, _>("sentiment")?
                .map(|s| *s),
            positive_reactions: row.try_get::<i64, _>("positive_reactions")? as u64,
            negative_reactions: row.try_get::<i64, _>("negative_reactions")? as u64,
            last_updated: row.try_get("last_updated")?,
        }))
    }
}
