use std::collections::HashMap;

use async_trait::async_trait;
use evalbot_ghapi_interface::{
    types::{GhPullRequest, GhReviewComment},
    REVIEW_COMMENTS_PER_PAGE,
};
use evalbot_models::{RepositoryPath, ReviewCandidate, Sentiment};
use regex::Regex;
use shaku::{Component, Interface};
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::{CoreContext, Result};

const WORKFLOW_VERSION_PATTERN: &str = r"(?i)ai-review-version:\s*([A-Za-z0-9._+\-]+)";

/// Extract the workflow version tag from a review comment body.
pub fn parse_workflow_version(body: &str) -> Result<Option<String>> {
    let regex = Regex::new(WORKFLOW_VERSION_PATTERN)?;
    Ok(regex
        .captures(body)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string()))
}

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait FetchReviewCandidatesInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        repository_path: &RepositoryPath,
        since: OffsetDateTime,
    ) -> Result<Vec<ReviewCandidate>>;
}

#[derive(Component)]
#[shaku(interface = FetchReviewCandidatesInterface)]
pub(crate) struct FetchReviewCandidates;

impl FetchReviewCandidates {
    async fn list_reviewer_comments<'a>(
        ctx: &CoreContext<'a>,
        repository_path: &RepositoryPath,
        since: OffsetDateTime,
    ) -> Result<Vec<GhReviewComment>> {
        let reviewer_login = &ctx.config.scraper.reviewer_login;
        let mut comments = vec![];
        let mut page = 1;

        loop {
            let batch = ctx
                .api_service
                .review_comments_list(repository_path.owner(), repository_path.name(), since, page)
                .await?;

            let batch_len = batch.len();
            let window_exceeded = batch.last().map(|c| c.created_at < since).unwrap_or(true);

            comments.extend(
                batch
                    .into_iter()
                    .filter(|c| c.created_at >= since && &c.user.login == reviewer_login),
            );

            if batch_len < REVIEW_COMMENTS_PER_PAGE as usize || window_exceeded {
                break;
            }

            page += 1;
        }

        Ok(comments)
    }

    fn build_candidate(
        repository_path: &RepositoryPath,
        comment: GhReviewComment,
        pull_request: &GhPullRequest,
    ) -> Result<ReviewCandidate> {
        let workflow_version = parse_workflow_version(&comment.body)?;
        let positive_reactions = comment.reactions.plus_one;
        let negative_reactions = comment.reactions.minus_one;

        Ok(ReviewCandidate {
            ai_review_id: ReviewCandidate::review_id_for_comment(repository_path, comment.id),
            repo_name: repository_path.full_name(),
            pr_number: pull_request.number,
            pr_url: pull_request.html_url.clone(),
            pr_title: Some(pull_request.title.clone()).filter(|t| !t.is_empty()),
            pr_review_id: comment.pull_request_review_id.unwrap_or_default(),
            review_comment_id: comment.id,
            review_comment_url: comment.url,
            original_commit_sha: comment.original_commit_id,
            workflow_version,
            created_at: comment.created_at,
            sentiment: Some(Sentiment::from_reactions(
                positive_reactions,
                negative_reactions,
            )),
            positive_reactions,
            negative_reactions,
        })
    }
}

#[async_trait]
impl FetchReviewCandidatesInterface for FetchReviewCandidates {
    #[tracing::instrument(skip(self, ctx), fields(repository_path = %repository_path))]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        repository_path: &RepositoryPath,
        since: OffsetDateTime,
    ) -> Result<Vec<ReviewCandidate>> {
        let comments = Self::list_reviewer_comments(ctx, repository_path, since).await?;
        debug!(count = comments.len(), message = "Fetched reviewer comments");

        let mut pull_requests: HashMap<u64, GhPullRequest> = HashMap::new();
        let mut candidates = Vec::with_capacity(comments.len());
        for comment in comments {
            let Some(number) = comment.pull_request_number() else {
                warn!(
                    comment_id = comment.id,
                    pull_request_url = comment.pull_request_url,
                    message = "Could not extract pull request number, skipping comment"
                );
                continue;
            };

            if !pull_requests.contains_key(&number) {
                let pull_request = ctx
                    .api_service
                    .pulls_get(repository_path.owner(), repository_path.name(), number)
                    .await?;
                pull_requests.insert(number, pull_request);
            }

            if let Some(pull_request) = pull_requests.get(&number) {
                candidates.push(Self::build_candidate(repository_path, comment, pull_request)?);
            }
        }

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use evalbot_ghapi_interface::types::{GhReactions, GhUser};
    use pretty_assertions::assert_eq;
    use time::macros::datetime;

    use super::*;
    use crate::context::tests::CoreContextTest;

    fn comment(id: u64, login: &str, created_at: OffsetDateTime) -> GhReviewComment {
        GhReviewComment {
            id,
            pull_request_review_id: Some(700),
            user: GhUser {
                login: login.into(),
            },
            body: "Nit: prefer a bounded channel.\n<!-- ai-review-version: v1.4.2 -->".into(),
            url: format!("https://api.github.com/repos/cockroachdb/molt/pulls/comments/{id}"),
            html_url: format!("https://github.com/cockroachdb/molt/pull/12#discussion_r{id}"),
            pull_request_url: "https://api.github.com/repos/cockroachdb/molt/pulls/12".into(),
            original_commit_id: Some("abcdef".into()),
            created_at,
            reactions: GhReactions {
                total_count: 2,
                plus_one: 2,
                minus_one: 0,
            },
        }
    }

    #[test]
    fn workflow_version() {
        assert_eq!(
            parse_workflow_version("<!-- ai-review-version: v1.4.2 -->").unwrap(),
            Some("v1.4.2".into())
        );
        assert_eq!(
            parse_workflow_version("text\nAI-Review-Version:2024.03.01-rc1").unwrap(),
            Some("2024.03.01-rc1".into())
        );
        assert_eq!(parse_workflow_version("no marker").unwrap(), None);
    }

    #[tokio::test]
    async fn run() {
        let mut ctx = CoreContextTest::new();
        ctx.config.scraper.reviewer_login = "github-actions[bot]".into();
        let since = datetime!(2024-03-01 00:00 UTC);

        ctx.api_service
            .expect_review_comments_list()
            .once()
            .withf(move |owner, name, s, page| {
                owner == "cockroachdb" && name == "molt" && s == &since && page == &1
            })
            .return_once(|_, _, _, _| {
                Ok(vec![
                    comment(3, "github-actions[bot]", datetime!(2024-03-03 10:00 UTC)),
                    comment(2, "someone", datetime!(2024-03-02 10:00 UTC)),
                    comment(1, "github-actions[bot]", datetime!(2024-02-20 10:00 UTC)),
                ])
            });

        ctx.api_service
            .expect_pulls_get()
            .once()
            .withf(|owner, name, number| owner == "cockroachdb" && name == "molt" && number == &12)
            .return_once(|_, _, _| {
                Ok(GhPullRequest {
                    number: 12,
                    title: "Add bounded fetch".into(),
                    html_url: "https://github.com/cockroachdb/molt/pull/12".into(),
                })
            });

        let candidates = FetchReviewCandidates
            .run(
                &ctx.as_context(),
                &RepositoryPath::new("cockroachdb/molt").unwrap(),
                since,
            )
            .await
            .unwrap();

        assert_eq!(
            candidates,
            vec![ReviewCandidate {
                ai_review_id: "cockroachdb/molt#3".into(),
                repo_name: "cockroachdb/molt".into(),
                pr_number: 12,
                pr_url: "https://github.com/cockroachdb/molt/pull/12".into(),
                pr_title: Some("Add bounded fetch".into()),
                pr_review_id: 700,
                review_comment_id: 3,
                review_comment_url: "https://api.github.com/repos/cockroachdb/molt/pulls/comments/3"
                    .into(),
                original_commit_sha: Some("abcdef".into()),
                workflow_version: Some("v1.4.2".into()),
                created_at: datetime!(2024-03-03 10:00 UTC),
                sentiment: Some(Sentiment::Positive),
                positive_reactions: 2,
                negative_reactions: 0,
            }]
        );
    }

    #[tokio::test]
    async fn follows_pages() {
        let mut ctx = CoreContextTest::new();
        ctx.config.scraper.reviewer_login = "github-actions[bot]".into();
        let since = datetime!(2024-03-01 00:00 UTC);

        ctx.api_service
            .expect_review_comments_list()
            .once()
            .withf(|_, _, _, page| page == &1)
            .return_once(|_, _, _, _| {
                Ok((0..REVIEW_COMMENTS_PER_PAGE as u64)
                    .map(|i| comment(1000 - i, "someone", datetime!(2024-03-05 10:00 UTC)))
                    .collect())
            });
        ctx.api_service
            .expect_review_comments_list()
            .once()
            .withf(|_, _, _, page| page == &2)
            .return_once(|_, _, _, _| Ok(vec![]));

        let candidates = FetchReviewCandidates
            .run(
                &ctx.as_context(),
                &RepositoryPath::new("cockroachdb/molt").unwrap(),
                since,
            )
            .await
            .unwrap();

        assert!(candidates.is_empty());
    }
}
