//! Cross-reference enrichment: scraped (title, year) → TMDB metadata.
//!
//! Matching is deliberately best-effort: the first search result wins,
//! with no disambiguation. That mismatching is possible when titles
//! collide is documented, accepted behavior; a stricter matcher would
//! change observable output.

use tracing::{debug, warn};

use crate::models::EnrichedMovie;
use crate::tmdb::models::{Credits, Movie, MovieDetails};
use crate::tmdb::TmdbClient;

pub struct Enricher {
    tmdb: TmdbClient,
}

impl Enricher {
    pub fn new(tmdb: TmdbClient) -> Self {
        Self { tmdb }
    }

    pub fn tmdb(&self) -> &TmdbClient {
        &self.tmdb
    }

    /// Join a scraped film reference to TMDB metadata.
    ///
    /// Returns `None` when the search has no results or cannot be
    /// reached; never a partial record. Detail and credit sub-queries
    /// degrade to empty fields rather than failing the enrichment.
    pub async fn enrich_movie(&self, title: &str, year: Option<i32>) -> Option<EnrichedMovie> {
        let results = match self.tmdb.search_movie(title, year).await {
            Ok(results) => results,
            Err(e) => {
                warn!(title, ?year, error = %e, "movie search failed");
                return None;
            }
        };

        let chosen = results.results.into_iter().next()?;
        debug!(title, id = chosen.id, matched = %chosen.title, "matched search result");

        let (details, credits) =
            tokio::join!(self.tmdb.movie_details(chosen.id), self.tmdb.movie_credits(chosen.id));

        let details = details
            .map_err(|e| warn!(id = chosen.id, error = %e, "details lookup degraded"))
            .ok();
        let credits = credits
            .map_err(|e| warn!(id = chosen.id, error = %e, "credits lookup degraded"))
            .ok();

        Some(shape(chosen, details, credits))
    }
}

/// Assemble the enriched record from the search hit plus whatever
/// sub-queries survived.
fn shape(chosen: Movie, details: Option<MovieDetails>, credits: Option<Credits>) -> EnrichedMovie {
    let genres = details
        .as_ref()
        .map(|d| d.genres.iter().map(|g| g.name.clone()).collect())
        .unwrap_or_default();
    let directors = credits.map(|c| c.directors()).unwrap_or_default();

    let overview = match details {
        Some(d) if !d.overview.is_empty() => d.overview,
        _ => chosen.overview,
    };

    EnrichedMovie {
        id: chosen.id,
        title: chosen.title,
        overview,
        poster_path: chosen.poster_path,
        vote_average: chosen.vote_average,
        genres,
        directors,
        release_date: chosen.release_date,
    }
}
