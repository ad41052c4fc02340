//! TMDB API client.
//!
//! Thin authenticated-GET wrappers over the endpoints the bot consumes:
//! search, movie details, credits, videos, similar movies, genre list,
//! discovery, and people. Responses are plain serde models; joining
//! them into an `EnrichedMovie` is `crate::enrich`'s job.

mod client;
mod discover;
mod error;
mod movie;
mod person;
mod quotes;
mod search;
pub mod models;

pub use client::TmdbClient;
pub use discover::DiscoverParams;
pub use error::TmdbError;
pub use quotes::{MovieQuote, QuoteClient};

pub type Result<T> = std::result::Result<T, TmdbError>;
