//! Presentation layer: merge scraped entities and their enrichment into
//! user-facing cards.
//!
//! Policy: presentation never blocks on enrichment. An entity with no
//! metadata renders with "N/A" in the gaps; it is never omitted.

pub mod grid;

use crate::models::{DiaryEntry, EnrichedMovie, FilmDetails, ProfileStats, ReviewEntry};

pub const NOT_AVAILABLE: &str = "N/A";

/// One labeled field on a card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardField {
    pub name: String,
    pub value: String,
}

/// Chat-agnostic rich message. The chat frontend (an external
/// collaborator) maps this onto its own embed type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageCard {
    pub title: String,
    pub url: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub fields: Vec<CardField>,
    pub footer: Option<String>,
}

fn field(name: &str, value: String) -> CardField {
    CardField {
        name: name.to_string(),
        value,
    }
}

fn or_na(value: Option<String>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Half-star rating as star glyphs, or "N/A" when unrated.
pub fn stars(rating: Option<f32>) -> String {
    let Some(rating) = rating else {
        return NOT_AVAILABLE.to_string();
    };
    let halves = (rating * 2.0).round() as i32;
    let mut out = "★".repeat((halves / 2).max(0) as usize);
    if halves % 2 == 1 {
        out.push('½');
    }
    if out.is_empty() {
        out.push('0');
    }
    out
}

fn join_or_na(items: &[String]) -> String {
    if items.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        items.join(", ")
    }
}

/// A user's recent diary, one line per viewing. Enrichment only adds
/// decoration (vote average); its absence never drops a line.
pub fn diary_card(username: &str, entries: &[(DiaryEntry, Option<EnrichedMovie>)]) -> MessageCard {
    let lines: Vec<String> = entries
        .iter()
        .map(|(entry, enriched)| {
            let date = or_na(entry.watched_date.map(|d| d.format("%Y-%m-%d").to_string()));
            let year = or_na(entry.year.map(|y| y.to_string()));
            let vote = or_na(
                enriched
                    .as_ref()
                    .map(|m| format!("TMDB {:.1}", m.vote_average)),
            );
            format!(
                "{} — {} ({}) {} · {}",
                date,
                entry.title,
                year,
                stars(entry.rating),
                vote
            )
        })
        .collect();

    MessageCard {
        title: format!("{}'s diary", username),
        description: Some(lines.join("\n")),
        footer: Some(format!("{} entries", entries.len())),
        ..Default::default()
    }
}

pub fn review_card(review: &ReviewEntry) -> MessageCard {
    MessageCard {
        title: format!(
            "{} ({})",
            review.film_title,
            or_na(review.film_year.map(|y| y.to_string()))
        ),
        url: review.review_url.clone(),
        description: Some(review.review_text.clone()),
        fields: vec![
            field("Rating", stars(review.rating)),
            field(
                "Reviewed",
                or_na(review.review_date.map(|d| d.format("%Y-%m-%d").to_string())),
            ),
        ],
        ..Default::default()
    }
}

pub fn film_card(film: &FilmDetails, enriched: Option<&EnrichedMovie>) -> MessageCard {
    let genres = enriched.map(|m| m.genres.clone()).unwrap_or_default();
    let directors = if film.directors.is_empty() {
        enriched.map(|m| m.directors.clone()).unwrap_or_default()
    } else {
        film.directors.clone()
    };

    MessageCard {
        title: format!(
            "{} ({})",
            film.title,
            or_na(film.year.map(|y| y.to_string()))
        ),
        description: film
            .synopsis
            .clone()
            .or_else(|| enriched.map(|m| m.overview.clone())),
        thumbnail_url: film
            .poster_url
            .clone()
            .or_else(|| enriched.and_then(|m| m.poster_url("w342"))),
        fields: vec![
            field("Directed by", join_or_na(&directors)),
            field("Genres", join_or_na(&genres)),
            field(
                "Runtime",
                or_na(film.runtime_minutes.map(|m| format!("{} min", m))),
            ),
            field(
                "TMDB rating",
                or_na(enriched.map(|m| format!("{:.1}", m.vote_average))),
            ),
        ],
        footer: film.tagline.clone(),
        ..Default::default()
    }
}

pub fn movie_card(movie: &EnrichedMovie) -> MessageCard {
    MessageCard {
        title: format!(
            "{} ({})",
            movie.title,
            or_na(movie.release_year().map(|y| y.to_string()))
        ),
        description: Some(movie.overview.clone()),
        thumbnail_url: movie.poster_url("w342"),
        fields: vec![
            field("Directed by", join_or_na(&movie.directors)),
            field("Genres", join_or_na(&movie.genres)),
            field("TMDB rating", format!("{:.1}", movie.vote_average)),
        ],
        ..Default::default()
    }
}

pub fn profile_card(stats: &ProfileStats) -> MessageCard {
    let count = |v: Option<u32>| or_na(v.map(|n| n.to_string()));
    MessageCard {
        title: stats.username.clone(),
        url: Some(stats.profile_url.clone()),
        thumbnail_url: stats.avatar_url.clone(),
        fields: vec![
            field("Films", count(stats.total_films)),
            field("This year", count(stats.films_this_year)),
            field("Following", count(stats.following)),
            field("Followers", count(stats.followers)),
            field("Watchlist", count(stats.watchlist_count)),
            field("Tags", join_or_na(&stats.tags)),
            field(
                "Favorites",
                join_or_na(
                    &stats
                        .favorites
                        .iter()
                        .map(|f| f.title.clone())
                        .collect::<Vec<_>>(),
                ),
            ),
        ],
        ..Default::default()
    }
}
