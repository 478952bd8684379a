use evalbot_database_interface::DatabaseError;
use evalbot_models::{Pagination, ReviewCandidate, ReviewFilter, Sentiment};
use pretty_assertions::assert_eq;
use time::{macros::datetime, Duration, OffsetDateTime};

use crate::testcase::db_test_case;

fn candidate(repo_name: &str, comment_id: u64, created_at: OffsetDateTime) -> ReviewCandidate {
    ReviewCandidate {
        ai_review_id: format!("{repo_name}#{comment_id}"),
        repo_name: repo_name.into(),
        pr_number: 10,
        pr_url: format!("https://github.com/{repo_name}/pull/10"),
        pr_title: Some("Add feature".into()),
        pr_review_id: 500,
        review_comment_id: comment_id,
        review_comment_url: format!(
            "https://api.github.com/repos/{repo_name}/pulls/comments/{comment_id}"
        ),
        original_commit_sha: Some("abcdef".into()),
        workflow_version: Some("v1.0.0".into()),
        created_at,
        sentiment: Some(Sentiment::Neutral),
        positive_reactions: 0,
        negative_reactions: 0,
    }
}

#[tokio::test]
async fn upsert_insert() {
    db_test_case("review_upsert_insert", |db| async move {
        assert_eq!(db.reviews_upsert(vec![]).await?, 0);

        let count = db
            .reviews_upsert(vec![
                candidate("cockroachdb/molt", 1, datetime!(2024-03-01 10:00 UTC)),
                candidate("cockroachdb/molt", 2, datetime!(2024-03-02 10:00 UTC)),
            ])
            .await?;
        assert_eq!(count, 2);
        assert_eq!(db.reviews_count().await?, 2);

        let review = db.reviews_get_expect("cockroachdb/molt#1").await?;
        assert_eq!(review.review_comment_id, 1);
        assert_eq!(review.created_at, datetime!(2024-03-01 10:00 UTC));
        assert_eq!(review.sentiment, Some(Sentiment::Neutral));
        assert_eq!(review.workflow_version.as_deref(), Some("v1.0.0"));

        assert_eq!(db.reviews_get("cockroachdb/molt#3").await?, None);
        assert!(matches!(
            db.reviews_get_expect("cockroachdb/molt#3").await,
            Err(DatabaseError::UnknownReview(_))
        ));

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn upsert_idempotent() {
    db_test_case("review_upsert_idempotent", |db| async move {
        let batch = vec![
            candidate("cockroachdb/molt", 1, datetime!(2024-03-01 10:00 UTC)),
            candidate("cockroachdb/molt", 2, datetime!(2024-03-02 10:00 UTC)),
        ];

        db.reviews_upsert(batch.clone()).await?;
        let first = db.reviews_all().await?;
        db.reviews_upsert(batch).await?;
        let second = db.reviews_all().await?;

        assert_eq!(db.reviews_count().await?, 2);
        let strip = |reviews: Vec<evalbot_models::Review>| -> Vec<ReviewCandidate> {
            reviews.iter().map(|r| r.to_candidate()).collect()
        };
        assert_eq!(strip(first), strip(second));

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn upsert_keeps_immutable_fields() {
    db_test_case("review_upsert_immutable", |db| async move {
        db.reviews_upsert(vec![candidate(
            "cockroachdb/molt",
            1,
            datetime!(2024-03-01 10:00 UTC),
        )])
        .await?;

        let mut update = candidate("cockroachdb/molt", 1, datetime!(2030-01-01 00:00 UTC));
        update.sentiment = Some(Sentiment::Positive);
        update.positive_reactions = 3;
        update.pr_title = Some("Renamed".into());
        db.reviews_upsert(vec![update]).await?;

        let review = db.reviews_get_expect("cockroachdb/molt#1").await?;
        assert_eq!(review.ai_review_id, "cockroachdb/molt#1");
        assert_eq!(review.created_at, datetime!(2024-03-01 10:00 UTC));
        assert_eq!(review.sentiment, Some(Sentiment::Positive));
        assert_eq!(review.positive_reactions, 3);
        assert_eq!(review.pr_title.as_deref(), Some("Renamed"));

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn upsert_refreshes_last_updated() {
    db_test_case("review_upsert_freshness", |db| async move {
        let batch = vec![candidate(
            "cockroachdb/molt",
            1,
            datetime!(2024-03-01 10:00 UTC),
        )];

        db.reviews_upsert(batch.clone()).await?;
        let mut previous = db.reviews_get_expect("cockroachdb/molt#1").await?.last_updated;

        for _ in 0..3 {
            db.reviews_upsert(batch.clone()).await?;
            let current = db.reviews_get_expect("cockroachdb/molt#1").await?.last_updated;
            assert!(current > previous);
            previous = current;
        }

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn upsert_is_atomic() {
    db_test_case("review_upsert_atomic", |db| async move {
        let base = datetime!(2024-03-01 10:00 UTC);
        let mut batch: Vec<_> = (1..=5)
            .map(|i| candidate("cockroachdb/molt", i, base + Duration::hours(i as i64)))
            .collect();
        batch[3].review_comment_url = String::new();

        assert!(matches!(
            db.reviews_upsert(batch).await,
            Err(DatabaseError::InvalidReview { .. })
        ));
        assert_eq!(db.reviews_count().await?, 0);

        let mut batch = vec![candidate("cockroachdb/molt", 1, base)];
        batch.push(ReviewCandidate {
            repo_name: "not-a-repository".into(),
            ..candidate("cockroachdb/molt", 2, base)
        });
        assert!(db.reviews_upsert(batch).await.is_err());
        assert_eq!(db.reviews_count().await?, 0);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn upsert_duplicates_last_wins() {
    db_test_case("review_upsert_duplicates", |db| async move {
        let first = candidate("cockroachdb/molt", 1, datetime!(2024-03-01 10:00 UTC));
        let mut second = first.clone();
        second.sentiment = Some(Sentiment::Negative);
        second.negative_reactions = 1;

        assert_eq!(db.reviews_upsert(vec![first, second]).await?, 2);
        assert_eq!(db.reviews_count().await?, 1);

        let review = db.reviews_get_expect("cockroachdb/molt#1").await?;
        assert_eq!(review.sentiment, Some(Sentiment::Negative));
        assert_eq!(review.negative_reactions, 1);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn list() {
    db_test_case("review_list", |db| async move {
        let mut molt_positive = candidate("cockroachdb/molt", 1, datetime!(2024-03-01 10:00 UTC));
        molt_positive.sentiment = Some(Sentiment::Positive);
        let mut molt_negative = candidate("cockroachdb/molt", 2, datetime!(2024-03-03 10:00 UTC));
        molt_negative.sentiment = Some(Sentiment::Negative);
        let mut molt_unset = candidate("cockroachdb/molt", 3, datetime!(2024-03-02 10:00 UTC));
        molt_unset.sentiment = None;
        let mut replicator_positive =
            candidate("cockroachdb/replicator", 4, datetime!(2024-03-04 10:00 UTC));
        replicator_positive.sentiment = Some(Sentiment::Positive);

        db.reviews_upsert(vec![
            molt_positive,
            molt_negative,
            molt_unset,
            replicator_positive,
        ])
        .await?;

        let ids = |reviews: Vec<evalbot_models::Review>| -> Vec<String> {
            reviews.into_iter().map(|r| r.ai_review_id).collect()
        };

        assert_eq!(
            ids(db.reviews_all().await?),
            vec![
                "cockroachdb/replicator#4",
                "cockroachdb/molt#2",
                "cockroachdb/molt#3",
                "cockroachdb/molt#1"
            ]
        );

        assert_eq!(
            ids(db
                .reviews_list(ReviewFilter {
                    sentiment: Some(Sentiment::Positive),
                    ..Default::default()
                })
                .await?),
            vec!["cockroachdb/replicator#4", "cockroachdb/molt#1"]
        );

        assert_eq!(
            ids(db
                .reviews_list(ReviewFilter {
                    repo_name: Some("cockroachdb/molt".into()),
                    pagination: Pagination::new(1, 5),
                    ..Default::default()
                })
                .await?),
            vec!["cockroachdb/molt#3", "cockroachdb/molt#1"]
        );

        assert_eq!(
            ids(db
                .reviews_list(ReviewFilter {
                    sentiment: Some(Sentiment::Neutral),
                    ..Default::default()
                })
                .await?),
            Vec::<String>::new()
        );

        Ok(())
    })
    .await;
}
