//! Ranking source: request, extraction and typed records

pub mod extract;
pub mod fetcher;
pub mod types;

pub use extract::PayloadExtractor;
pub use fetcher::{RankingClient, RankingQuery, RankingSource};
pub use types::{Project, RankingPayload};
