use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{now_utc_micros, RepositoryPath, RepositoryPathError};

/// Tracked source repository.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Repository {
    pub repo_name: String,
    pub enabled: bool,
    pub team: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub subscribed_at: OffsetDateTime,
}

impl Default for Repository {
    fn default() -> Self {
        Self {
            repo_name: String::new(),
            enabled: true,
            team: None,
            subscribed_at: now_utc_micros(),
        }
    }
}

impl Repository {
    pub fn new(path: &RepositoryPath) -> Self {
        Self {
            repo_name: path.full_name(),
            ..Default::default()
        }
    }

    pub fn path(&self) -> Result<RepositoryPath, RepositoryPathError> {
        RepositoryPath::new(&self.repo_name)
    }

    pub fn with_team<T: Into<String>>(mut self, team: T) -> Self {
        self.team = Some(team.into());
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}
