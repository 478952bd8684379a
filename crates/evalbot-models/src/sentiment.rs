use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SentimentError {
    /// Unknown sentiment.
    #[error("Unknown sentiment: {status}. Expected one of: positive, negative, neutral")]
    UnknownSentiment { status: String },
}

/// Human feedback on a review comment.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Copy, Clone, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn to_str(self) -> &'static str {
        self.into()
    }

    /// Classify reaction counts: the majority wins, a tie is neutral.
    pub fn from_reactions(positive: u64, negative: u64) -> Self {
        match positive.cmp(&negative) {
            std::cmp::Ordering::Greater => Self::Positive,
            std::cmp::Ordering::Less => Self::Negative,
            std::cmp::Ordering::Equal => Self::Neutral,
        }
    }
}

impl Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for Sentiment {
    type Err = SentimentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl TryFrom<&str> for Sentiment {
    type Error = SentimentError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "positive" => Ok(Self::Positive),
            "negative" => Ok(Self::Negative),
            "neutral" => Ok(Self::Neutral),
            e => Err(SentimentError::UnknownSentiment {
                status: e.to_string(),
            }),
        }
    }
}

impl From<Sentiment> for &'static str {
    fn from(sentiment: Sentiment) -> Self {
        match sentiment {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}
