use thiserror::Error;

/// Input problems caught before any request is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("message must not be empty")]
    EmptyMessage,
    #[error("rating '{raw}' is not a whole number")]
    RatingNotInteger { raw: String },
    #[error("rating {rating} is outside 1..=5")]
    RatingOutOfRange { rating: i64 },
    #[error("a label must be selected")]
    MissingLabel,
    #[error("asset name must not be empty")]
    EmptyAssetName,
}

impl ValidationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyMessage => "Please enter a message to analyze.",
            Self::RatingNotInteger { .. } | Self::RatingOutOfRange { .. } => {
                "Please enter a valid rating between 1 and 5."
            }
            Self::MissingLabel => "Please fill in all fields.",
            Self::EmptyAssetName => "Please choose an asset to open.",
        }
    }
}
