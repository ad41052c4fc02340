//! CSS selectors and guard phrases for letterboxd.com markup.
//!
//! These are versioned constants tracking the site's current markup,
//! not stable contracts. When the site ships a redesign, this file is
//! what changes.

// Diary page (/{user}/films/diary/page/{n}/)
pub(crate) const DIARY_ROW: &str = "tr.diary-entry-row";
pub(crate) const DIARY_TITLE_LINK: &str = "td.td-film-details h3 a";
pub(crate) const DIARY_YEAR: &str = "td.td-released";
pub(crate) const DIARY_DAY_LINK: &str = "td.td-day a";
pub(crate) const DIARY_REVIEW_LINK: &str = "td.td-review a";

// Reviews page (/{user}/films/reviews/page/{n}/)
pub(crate) const REVIEW_BLOCK: &str = "div.film-detail-content";
pub(crate) const REVIEW_TITLE_LINK: &str = "h2.headline-2 a";
pub(crate) const REVIEW_YEAR: &str = "small.metadata a";
pub(crate) const REVIEW_DATE: &str = "span.date time";
pub(crate) const REVIEW_TEXT: &str = "div.body-text p";

// Poster-list pages (likes, watchlist) and the favorites strip
pub(crate) const POSTER_ITEM: &str = "li.poster-container div.film-poster";
pub(crate) const FAVORITES_SECTION: &str = "section#favourites div.film-poster";
pub(crate) const POSTER_IMG: &str = "img";

// Film detail page (/film/{slug}/)
pub(crate) const FILM_TITLE: &str = "section.film-header h1";
pub(crate) const FILM_YEAR_LINK: &str = "section.film-header small.number a";
pub(crate) const FILM_TAGLINE: &str = "section .tagline";
pub(crate) const FILM_SYNOPSIS: &str = "section .truncate p";
pub(crate) const FILM_DIRECTOR: &str = "span.directorlist a.contributor";
pub(crate) const FILM_RUNTIME: &str = "p.text-link";
pub(crate) const FILM_POSTER: &str = "section.poster-list img";

// Profile page (/{user}/)
pub(crate) const PROFILE_STATISTIC: &str = "div.profile-stats h4.profile-statistic";
pub(crate) const PROFILE_STAT_VALUE: &str = "span.value";
pub(crate) const PROFILE_STAT_DEFINITION: &str = "span.definition";
pub(crate) const PROFILE_AVATAR: &str = "div.profile-avatar img";
pub(crate) const PROFILE_TAG: &str = "div.profile-tags a";

// Rating markup shared by diary rows and review blocks
pub(crate) const RATING_METER: &str = "span.rating";
pub(crate) const RATING_INPUT: &str = "input.rateit-field";

// Attributes carrying structured data
pub(crate) const ATTR_FILM_SLUG: &str = "data-film-slug";
pub(crate) const ATTR_TARGET_LINK: &str = "data-target-link";
pub(crate) const ATTR_VIEWING_ID: &str = "data-viewing-id";
pub(crate) const ATTR_VIEWING_DATE: &str = "data-viewing-date";
pub(crate) const ATTR_ARIA_VALUENOW: &str = "aria-valuenow";

// Guard phrases checked before any field extraction
pub(crate) const PHRASE_PRIVATE: &str = "This profile is private";
pub(crate) const PHRASE_NOT_FOUND: &str = "Sorry, we can\u{2019}t find the page";
pub(crate) const PHRASE_NOT_FOUND_PLAIN: &str = "Sorry, we can't find the page";
