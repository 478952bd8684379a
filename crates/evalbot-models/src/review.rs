use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;

use crate::{truncate_to_micros, RepositoryPath, Sentiment};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReviewValidationError {
    #[error("Review identifier is empty")]
    EmptyIdentifier,
    #[error("Review '{ai_review_id}' has an invalid repository name '{repo_name}'")]
    InvalidRepositoryName {
        ai_review_id: String,
        repo_name: String,
    },
    #[error("Review '{ai_review_id}' has an empty '{field}' field")]
    EmptyField {
        ai_review_id: String,
        field: &'static str,
    },
}

/// Incoming review record, before it is merged in the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewCandidate {
    pub ai_review_id: String,
    pub repo_name: String,
    pub pr_number: u64,
    pub pr_url: String,
    #[serde(default)]
    pub pr_title: Option<String>,
    pub pr_review_id: u64,
    pub review_comment_id: u64,
    pub review_comment_url: String,
    #[serde(default)]
    pub original_commit_sha: Option<String>,
    #[serde(default)]
    pub workflow_version: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default)]
    pub sentiment: Option<Sentiment>,
    #[serde(default)]
    pub positive_reactions: u64,
    #[serde(default)]
    pub negative_reactions: u64,
}

impl ReviewCandidate {
    /// Stable review identifier derived from the repository and the comment.
    pub fn review_id_for_comment(repository: &RepositoryPath, comment_id: u64) -> String {
        format!("{}#{}", repository.full_name(), comment_id)
    }

    pub fn validate(&self) -> Result<(), ReviewValidationError> {
        if self.ai_review_id.trim().is_empty() {
            return Err(ReviewValidationError::EmptyIdentifier);
        }

        if RepositoryPath::new(&self.repo_name).is_err() {
            return Err(ReviewValidationError::InvalidRepositoryName {
                ai_review_id: self.ai_review_id.clone(),
                repo_name: self.repo_name.clone(),
            });
        }

        for (field, value) in [
            ("pr_url", &self.pr_url),
            ("review_comment_url", &self.review_comment_url),
        ] {
            if value.trim().is_empty() {
                return Err(ReviewValidationError::EmptyField {
                    ai_review_id: self.ai_review_id.clone(),
                    field,
                });
            }
        }

        Ok(())
    }

    pub fn into_review(self, last_updated: OffsetDateTime) -> Review {
        Review {
            ai_review_id: self.ai_review_id,
            repo_name: self.repo_name,
            pr_number: self.pr_number,
            pr_url: self.pr_url,
            pr_title: self.pr_title,
            pr_review_id: self.pr_review_id,
            review_comment_id: self.review_comment_id,
            review_comment_url: self.review_comment_url,
            original_commit_sha: self.original_commit_sha,
            workflow_version: self.workflow_version,
            created_at: truncate_to_micros(self.created_at),
            sentiment: self.sentiment,
            positive_reactions: self.positive_reactions,
            negative_reactions: self.negative_reactions,
            last_updated,
        }
    }
}

/// Stored review feedback record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Review {
    pub ai_review_id: String,
    pub repo_name: String,
    pub pr_number: u64,
    pub pr_url: String,
    pub pr_title: Option<String>,
    pub pr_review_id: u64,
    pub review_comment_id: u64,
    pub review_comment_url: String,
    pub original_commit_sha: Option<String>,
    pub workflow_version: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub sentiment: Option<Sentiment>,
    pub positive_reactions: u64,
    pub negative_reactions: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub last_updated: OffsetDateTime,
}

impl Review {
    /// Browser link to the comment inside the pull request conversation.
    pub fn review_comment_web_url(&self) -> String {
        format!("{}#discussion_r{}", self.pr_url, self.review_comment_id)
    }

    /// Overwrite mutable fields from a candidate.
    ///
    /// Identifier and creation date are kept as stored.
    pub fn merge(&mut self, candidate: ReviewCandidate, last_updated: OffsetDateTime) {
        self.repo_name = candidate.repo_name;
        self.pr_number = candidate.pr_number;
        self.pr_url = candidate.pr_url;
        self.pr_title = candidate.pr_title;
        self.pr_review_id = candidate.pr_review_id;
        self.review_comment_id = candidate.review_comment_id;
        self.review_comment_url = candidate.review_comment_url;
        self.original_commit_sha = candidate.original_commit_sha;
        self.workflow_version = candidate.workflow_version;
        self.sentiment = candidate.sentiment;
        self.positive_reactions = candidate.positive_reactions;
        self.negative_reactions = candidate.negative_reactions;
        self.last_updated = last_updated;
    }

    pub fn to_candidate(&self) -> ReviewCandidate {
        ReviewCandidate {
            ai_review_id: self.ai_review_id.clone(),
            repo_name: self.repo_name.clone(),
            pr_number: self.pr_number,
            pr_url: self.pr_url.clone(),
            pr_title: self.pr_title.clone(),
            pr_review_id: self.pr_review_id,
            review_comment_id: self.review_comment_id,
            review_comment_url: self.review_comment_url.clone(),
            original_commit_sha: self.original_commit_sha.clone(),
            workflow_version: self.workflow_version.clone(),
            created_at: self.created_at,
            sentiment: self.sentiment,
            positive_reactions: self.positive_reactions,
            negative_reactions: self.negative_reactions,
        }
    }
}
