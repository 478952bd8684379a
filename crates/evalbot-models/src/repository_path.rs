//! Repository path.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryPathError {
    /// Invalid repository path.
    #[error("Invalid repository name format: {path}. Expected format: owner/repo")]
    InvalidRepositoryPath { path: String },
}

/// Repository path, in `owner/name` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepositoryPath {
    owner: String,
    name: String,
}

impl RepositoryPath {
    pub fn new(path: &str) -> Result<Self, RepositoryPathError> {
        let (owner, name) = Self::split_repo_path(path)?;

        Ok(Self {
            owner: owner.into(),
            name: name.into(),
        })
    }

    pub fn new_from_components(owner: &str, name: &str) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    pub fn components(&self) -> (&str, &str) {
        (&self.owner, &self.name)
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    fn split_repo_path(repo_path: &str) -> Result<(&str, &str), RepositoryPathError> {
        match repo_path.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok((owner, name))
            }
            _ => Err(RepositoryPathError::InvalidRepositoryPath {
                path: repo_path.to_string(),
            }),
        }
    }
}

impl FromStr for RepositoryPath {
    type Err = RepositoryPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.try_into()
    }
}

impl TryFrom<&str> for RepositoryPath {
    type Error = RepositoryPathError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for RepositoryPath {
    type Error = RepositoryPathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<(&str, &str)> for RepositoryPath {
    fn from((owner, name): (&str, &str)) -> Self {
        Self::new_from_components(owner, name)
    }
}

impl From<RepositoryPath> for String {
    fn from(value: RepositoryPath) -> Self {
        value.full_name()
    }
}

impl std::fmt::Display for RepositoryPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        let path = RepositoryPath::new("cockroachdb/molt").unwrap();
        assert_eq!(path.components(), ("cockroachdb", "molt"));
        assert_eq!(path.to_string(), "cockroachdb/molt");

        for invalid in ["molt", "/molt", "cockroachdb/", "a/b/c", ""] {
            assert_eq!(
                RepositoryPath::new(invalid),
                Err(RepositoryPathError::InvalidRepositoryPath {
                    path: invalid.into()
                })
            );
        }
    }
}
