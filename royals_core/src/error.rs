use thiserror::Error;

use crate::card::Rank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown card rank {0}")]
pub struct UnknownCard(pub Rank);

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server answered {status} for {url}")]
    Status { status: u16, url: String },
    #[error("malformed snapshot: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("malformed snapshot: {0}")]
    Card(#[from] UnknownCard),
}
