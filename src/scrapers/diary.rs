//! Diary page extraction.

use chrono::NaiveDate;
use scraper::{ElementRef, Html};
use tracing::warn;

use crate::error::Result;
use crate::models::DiaryEntry;

use super::extract::{
    date_from_iso, date_from_path, rating_half_stars, resolve, select_first, select_first_text,
    sel, year_from_text, year_from_title,
};
use super::paginate::collect_pages;
use super::selectors;
use super::LetterboxdScraper;

impl LetterboxdScraper {
    /// All logged viewings from a user's diary, newest first (site
    /// order), deduplicated by viewing id.
    pub async fn fetch_diary(&self, username: &str) -> Result<Vec<DiaryEntry>> {
        let entries = collect_pages(
            self.fetcher(),
            username,
            |page| self.page_url(&format!("{}/films/diary", username), page),
            self.max_pages(),
            parse_diary_page,
        )
        .await?;

        let mut seen = std::collections::HashSet::new();
        Ok(entries
            .into_iter()
            .filter(|e| seen.insert(e.viewing_id.clone()))
            .collect())
    }
}

fn slug_from_attr(row: ElementRef<'_>) -> Option<String> {
    row.select(&sel(&format!("[{}]", selectors::ATTR_FILM_SLUG)))
        .next()
        .and_then(|el| el.value().attr(selectors::ATTR_FILM_SLUG))
        .map(str::to_string)
        .filter(|s| !s.is_empty())
}

fn slug_from_title_href(row: ElementRef<'_>) -> Option<String> {
    select_first(row, selectors::DIARY_TITLE_LINK)
        .and_then(|el| el.value().attr("href"))
        .and_then(slug_from_film_path)
}

/// Slug out of any path containing a `/film/{slug}/` segment.
pub(crate) fn slug_from_film_path(href: &str) -> Option<String> {
    let (_, rest) = href.split_once("/film/")?;
    let slug = rest.split('/').next()?;
    if slug.is_empty() {
        None
    } else {
        Some(slug.to_string())
    }
}

fn year_from_cell(row: ElementRef<'_>) -> Option<i32> {
    select_first_text(row, selectors::DIARY_YEAR).and_then(|t| year_from_text(&t))
}

fn year_from_headline(row: ElementRef<'_>) -> Option<i32> {
    select_first_text(row, selectors::DIARY_TITLE_LINK).and_then(|t| year_from_title(&t))
}

fn date_from_attr(row: ElementRef<'_>) -> Option<NaiveDate> {
    row.value()
        .attr(selectors::ATTR_VIEWING_DATE)
        .and_then(date_from_iso)
}

fn date_from_day_link(row: ElementRef<'_>) -> Option<NaiveDate> {
    select_first(row, selectors::DIARY_DAY_LINK)
        .and_then(|el| el.value().attr("href"))
        .and_then(date_from_path)
}

/// Extract one diary page. Rows missing their identifying fields
/// (slug, viewing id, watched date) are dropped, not fatal.
pub(crate) fn parse_diary_page(doc: &Html) -> Vec<DiaryEntry> {
    let row_sel = sel(selectors::DIARY_ROW);
    let mut entries = Vec::new();

    for row in doc.select(&row_sel) {
        let viewing_id = row
            .value()
            .attr(selectors::ATTR_VIEWING_ID)
            .map(str::to_string)
            .filter(|v| !v.is_empty());

        let slug = resolve(row, &[slug_from_attr, slug_from_title_href]);
        let title = select_first_text(row, selectors::DIARY_TITLE_LINK)
            .map(|t| strip_year_suffix(&t));
        let watched_date = resolve(row, &[date_from_attr, date_from_day_link]);

        let (viewing_id, slug, title, watched_date) =
            match (viewing_id, slug, title, watched_date) {
                (Some(v), Some(s), Some(t), Some(d)) => (v, s, t, Some(d)),
                (viewing_id, slug, title, _) => {
                    warn!(
                        ?viewing_id,
                        ?slug,
                        ?title,
                        "dropping diary row missing identifying fields"
                    );
                    continue;
                }
            };

        let review_url = select_first(row, selectors::DIARY_REVIEW_LINK)
            .and_then(|el| el.value().attr("href"))
            .map(str::to_string);

        entries.push(DiaryEntry {
            slug,
            title,
            year: resolve(row, &[year_from_cell, year_from_headline]),
            rating: rating_half_stars(row),
            watched_date,
            viewing_id,
            review_url,
        });
    }

    entries
}

/// Headline text sometimes carries the "(Year)" suffix the year
/// fallback parses out; the title field should not.
fn strip_year_suffix(title: &str) -> String {
    match title.rsplit_once(" (") {
        Some((name, rest)) if rest.ends_with(')') && year_from_title(&format!("({rest}")).is_some() => {
            name.to_string()
        }
        _ => title.to_string(),
    }
}
