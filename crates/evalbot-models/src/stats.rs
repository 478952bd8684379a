//! Sentiment statistics over stored reviews.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::{Date, Duration};

use crate::{Review, Sentiment};

/// Grouping key used for reviews without workflow version.
pub const UNKNOWN_VERSION: &str = "unknown";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct SentimentCounts {
    pub total: u64,
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
    /// Percentage of positive reviews, rounded to one decimal.
    pub positive_rate: f64,
}

impl SentimentCounts {
    fn add(&mut self, sentiment: Option<Sentiment>) {
        self.total += 1;
        match sentiment {
            Some(Sentiment::Positive) => self.positive += 1,
            Some(Sentiment::Negative) => self.negative += 1,
            Some(Sentiment::Neutral) => self.neutral += 1,
            None => (),
        }
    }

    fn finish(mut self) -> Self {
        self.positive_rate = if self.total == 0 {
            0.0
        } else {
            (self.positive as f64 * 1000.0 / self.total as f64).round() / 10.0
        };
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RepositoryStats {
    pub repo_name: String,
    #[serde(flatten)]
    pub counts: SentimentCounts,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VersionStats {
    pub workflow_version: String,
    #[serde(flatten)]
    pub counts: SentimentCounts,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyTrend {
    /// UTC day, `YYYY-MM-DD`.
    pub date: String,
    pub total: u64,
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
}

fn group_by<'a, F>(reviews: &'a [Review], key: F) -> Vec<(String, SentimentCounts)>
where
    F: Fn(&'a Review) -> String,
{
    let mut groups: BTreeMap<String, SentimentCounts> = BTreeMap::new();
    for review in reviews {
        groups.entry(key(review)).or_default().add(review.sentiment);
    }

    let mut groups: Vec<_> = groups
        .into_iter()
        .map(|(k, counts)| (k, counts.finish()))
        .collect();
    // BTreeMap order is kept for equal totals.
    groups.sort_by(|a, b| b.1.total.cmp(&a.1.total));
    groups
}

pub fn repository_stats(reviews: &[Review]) -> Vec<RepositoryStats> {
    group_by(reviews, |r| r.repo_name.clone())
        .into_iter()
        .map(|(repo_name, counts)| RepositoryStats { repo_name, counts })
        .collect()
}

pub fn version_stats(reviews: &[Review]) -> Vec<VersionStats> {
    group_by(reviews, |r| {
        r.workflow_version
            .clone()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| UNKNOWN_VERSION.into())
    })
    .into_iter()
    .map(|(workflow_version, counts)| VersionStats {
        workflow_version,
        counts,
    })
    .collect()
}

/// One bucket per UTC day, from `today - (days - 1)` to `today`, oldest first.
pub fn daily_trends(reviews: &[Review], today: Date, days: u32) -> Vec<DailyTrend> {
    let days = days.max(1);
    let first = today - Duration::days(i64::from(days) - 1);

    let mut buckets: BTreeMap<Date, SentimentCounts> = BTreeMap::new();
    let mut day = first;
    while day <= today {
        buckets.insert(day, SentimentCounts::default());
        day += Duration::days(1);
    }

    for review in reviews {
        let date = review.created_at.to_offset(time::UtcOffset::UTC).date();
        if let Some(bucket) = buckets.get_mut(&date) {
            bucket.add(review.sentiment);
        }
    }

    buckets
        .into_iter()
        .map(|(date, counts)| DailyTrend {
            date: format_date(date),
            total: counts.total,
            positive: counts.positive,
            negative: counts.negative,
            neutral: counts.neutral,
        })
        .collect()
}

fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}
