use thiserror::Error;

pub type Result<T> = std::result::Result<T, RecommendError>;

/// Conditions reported by the stores and the recommendation pipeline.
///
/// `TargetNotFound` and `NoSimilarUsers` are diagnostics: they travel next to
/// an empty result inside [`crate::Outcome`] and never abort the caller.
/// The remaining variants are returned as `Err` by mutating or loading calls.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecommendError {
    #[error("Target user not found: {0}")]
    TargetNotFound(String),

    #[error("No similar users for: {0}")]
    NoSimilarUsers(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid rating {rating} for user {user_id} on item {item_id}")]
    InvalidRating {
        user_id: String,
        item_id: String,
        rating: f64,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl RecommendError {
    /// True for the conditions that degrade to an empty result instead of failing.
    pub fn is_diagnostic(&self) -> bool {
        matches!(
            self,
            RecommendError::TargetNotFound(_) | RecommendError::NoSimilarUsers(_)
        )
    }
}

impl From<serde_json::Error> for RecommendError {
    fn from(err: serde_json::Error) -> Self {
        RecommendError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for RecommendError {
    fn from(err: std::io::Error) -> Self {
        RecommendError::Io(err.to_string())
    }
}
