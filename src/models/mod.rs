//! Scraped and enriched entity types.
//!
//! All of these are value objects: constructed once per scrape or
//! enrichment cycle, never mutated, never cached inside the core.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One logged viewing from a user's diary page.
///
/// `viewing_id` is unique per logged watch and is what downstream
/// consumers key on for de-duplication. `rating`, when present, is one
/// of the ten half-star values 0.5–5.0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiaryEntry {
    pub slug: String,
    pub title: String,
    pub year: Option<i32>,
    pub rating: Option<f32>,
    pub watched_date: Option<NaiveDate>,
    pub viewing_id: String,
    pub review_url: Option<String>,
}

/// One review from a user's reviews page. `review_text` may be the
/// site's truncated teaser ending in an ellipsis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewEntry {
    pub film_title: String,
    pub film_year: Option<i32>,
    pub film_slug: String,
    pub review_url: Option<String>,
    pub review_text: String,
    pub review_date: Option<NaiveDate>,
    pub rating: Option<f32>,
}

/// A film from the favorites strip on a profile page. Order is the
/// site's order; callers see at most the first four.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteFilm {
    pub title: String,
    pub year: Option<i32>,
    pub slug: String,
    pub url: String,
}

/// A film from the liked-films pages. Accumulates across pages in site
/// order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LikedFilm {
    pub title: String,
    pub year: Option<i32>,
    pub slug: String,
    pub url: String,
}

/// Full record scraped from a film-detail page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilmDetails {
    pub slug: String,
    pub title: String,
    pub year: Option<i32>,
    pub tagline: Option<String>,
    pub synopsis: Option<String>,
    pub directors: Vec<String>,
    pub runtime_minutes: Option<u32>,
    pub poster_url: Option<String>,
}

/// Profile header statistics. Every field is independently optional
/// because each depends on a page section being present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileStats {
    pub username: String,
    pub total_films: Option<u32>,
    pub films_this_year: Option<u32>,
    pub following: Option<u32>,
    pub followers: Option<u32>,
    pub watchlist_count: Option<u32>,
    pub tags: Vec<String>,
    pub avatar_url: Option<String>,
    pub profile_url: String,
    pub favorites: Vec<FavoriteFilm>,
}

/// Metadata joined from TMDB by (title, year) lookup. Either fully
/// formed or absent; never partial.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichedMovie {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub vote_average: f64,
    pub genres: Vec<String>,
    pub directors: Vec<String>,
    pub release_date: Option<String>,
}

impl EnrichedMovie {
    /// Release year parsed from the `YYYY-MM-DD` date TMDB returns.
    pub fn release_year(&self) -> Option<i32> {
        self.release_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .and_then(|y| y.parse().ok())
    }

    /// Full CDN URL for the poster at the given width class (e.g. "w342").
    pub fn poster_url(&self, size: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|p| format!("https://image.tmdb.org/t/p/{}{}", size, p))
    }
}
