use crate::Sentiment;

/// Offset pagination; a missing limit means "everything".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub skip: u64,
    pub limit: Option<u64>,
}

impl Pagination {
    pub const DEFAULT_LIMIT: u64 = 100;

    pub fn new(skip: u64, limit: u64) -> Self {
        Self {
            skip,
            limit: Some(limit),
        }
    }

    pub fn all() -> Self {
        Self::default()
    }

    /// Apply on an already ordered iterator.
    pub fn apply<T, I: Iterator<Item = T>>(&self, iter: I) -> impl Iterator<Item = T> {
        let skip = usize::try_from(self.skip).unwrap_or(usize::MAX);
        let take = self
            .limit
            .map(|l| usize::try_from(l).unwrap_or(usize::MAX))
            .unwrap_or(usize::MAX);
        iter.skip(skip).take(take)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryFilter {
    pub enabled_only: bool,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewFilter {
    pub sentiment: Option<Sentiment>,
    pub repo_name: Option<String>,
    pub pagination: Pagination,
}

impl ReviewFilter {
    pub fn matches(&self, repo_name: &str, sentiment: Option<Sentiment>) -> bool {
        if let Some(expected) = self.sentiment {
            if sentiment != Some(expected) {
                return false;
            }
        }

        match &self.repo_name {
            Some(expected) => expected == repo_name,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination() {
        let values = 0..10;
        assert_eq!(
            Pagination::new(2, 3).apply(values.clone()).collect::<Vec<_>>(),
            vec![2, 3, 4]
        );
        assert_eq!(Pagination::all().apply(values.clone()).count(), 10);
        assert_eq!(Pagination::new(20, 3).apply(values).count(), 0);
    }

    #[test]
    fn review_filter() {
        let filter = ReviewFilter {
            sentiment: Some(Sentiment::Positive),
            repo_name: Some("cockroachdb/molt".into()),
            ..Default::default()
        };

        assert!(filter.matches("cockroachdb/molt", Some(Sentiment::Positive)));
        assert!(!filter.matches("cockroachdb/molt", None));
        assert!(!filter.matches("cockroachdb/molt", Some(Sentiment::Neutral)));
        assert!(!filter.matches("cockroachdb/replicator", Some(Sentiment::Positive)));
        assert!(ReviewFilter::default().matches("any/repo", None));
    }
}
