use async_trait::async_trait;
use evalbot_models::{
    stats::{daily_trends, repository_stats, version_stats, DailyTrend, RepositoryStats, VersionStats},
    ReviewFilter,
};
use shaku::{Component, Interface};
use time::OffsetDateTime;

use crate::{CoreContext, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub repositories: Vec<RepositoryStats>,
    pub versions: Vec<VersionStats>,
    pub trends: Vec<DailyTrend>,
}

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait BuildStatisticsInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        repo_name: Option<String>,
        days: u32,
    ) -> Result<Statistics>;
}

#[derive(Component)]
#[shaku(interface = BuildStatisticsInterface)]
pub(crate) struct BuildStatistics;

#[async_trait]
impl BuildStatisticsInterface for BuildStatistics {
    #[tracing::instrument(skip(self, ctx))]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        repo_name: Option<String>,
        days: u32,
    ) -> Result<Statistics> {
        let reviews = ctx
            .db_service
            .reviews_list(ReviewFilter {
                repo_name,
                ..Default::default()
            })
            .await?;

        let today = OffsetDateTime::now_utc().date();
        Ok(Statistics {
            repositories: repository_stats(&reviews),
            versions: version_stats(&reviews),
            trends: daily_trends(&reviews, today, days),
        })
    }
}

#[cfg(test)]
mod tests {
    use evalbot_database_interface::DbService;
    use evalbot_models::{ReviewCandidate, Sentiment};
    use pretty_assertions::assert_eq;
    use time::Duration;

    use super::*;
    use crate::context::tests::CoreContextTest;

    fn candidate(repo_name: &str, comment_id: u64, sentiment: Sentiment) -> ReviewCandidate {
        ReviewCandidate {
            ai_review_id: format!("{repo_name}#{comment_id}"),
            repo_name: repo_name.into(),
            pr_number: 1,
            pr_url: format!("https://github.com/{repo_name}/pull/1"),
            pr_title: None,
            pr_review_id: 1,
            review_comment_id: comment_id,
            review_comment_url: format!("https://api.github.com/comments/{comment_id}"),
            original_commit_sha: None,
            workflow_version: Some("v2".into()),
            created_at: OffsetDateTime::now_utc() - Duration::hours(1),
            sentiment: Some(sentiment),
            positive_reactions: 0,
            negative_reactions: 0,
        }
    }

    #[tokio::test]
    async fn run() {
        let ctx = CoreContextTest::new();
        ctx.db_service
            .reviews_upsert(vec![
                candidate("cockroachdb/molt", 1, Sentiment::Positive),
                candidate("cockroachdb/molt", 2, Sentiment::Negative),
                candidate("cockroachdb/replicator", 3, Sentiment::Positive),
            ])
            .await
            .unwrap();

        let stats = BuildStatistics
            .run(&ctx.as_context(), None, 7)
            .await
            .unwrap();
        assert_eq!(stats.repositories.len(), 2);
        assert_eq!(stats.repositories[0].repo_name, "cockroachdb/molt");
        assert_eq!(stats.repositories[0].counts.positive_rate, 50.0);
        assert_eq!(stats.versions.len(), 1);
        assert_eq!(stats.versions[0].counts.total, 3);
        assert_eq!(stats.trends.len(), 7);
        assert_eq!(stats.trends.iter().map(|t| t.total).sum::<u64>(), 3);

        let stats = BuildStatistics
            .run(&ctx.as_context(), Some("cockroachdb/replicator".into()), 1)
            .await
            .unwrap();
        assert_eq!(stats.repositories.len(), 1);
        assert_eq!(stats.repositories[0].counts.positive_rate, 100.0);
    }
}
