//! Like/dislike feedback on outfits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A user's reaction to an outfit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackReaction {
    Liked,
    Disliked,
}

impl FeedbackReaction {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackReaction::Liked => "liked",
            FeedbackReaction::Disliked => "disliked",
        }
    }
}

impl fmt::Display for FeedbackReaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackReaction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "liked" | "like" => Ok(FeedbackReaction::Liked),
            "disliked" | "dislike" => Ok(FeedbackReaction::Disliked),
            other => Err(format!(
                "unknown reaction '{}', expected 'liked' or 'disliked'",
                other
            )),
        }
    }
}

/// Body of `POST /api/users/{id}/feedback`.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackRequest<'a> {
    pub outfit_id: &'a str,
    pub feedback: FeedbackReaction,
}

/// A stored feedback record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    #[serde(default, deserialize_with = "super::deserialize_opt_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_opt_id")]
    pub outfit_id: Option<String>,
    #[serde(alias = "feedback")]
    pub reaction: FeedbackReaction,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Response to a feedback submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub feedback: Option<FeedbackRecord>,
}
