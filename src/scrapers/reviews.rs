//! Reviews page extraction.

use chrono::NaiveDate;
use scraper::{ElementRef, Html};
use tracing::warn;

use crate::error::Result;
use crate::models::ReviewEntry;

use super::diary::slug_from_film_path;
use super::extract::{
    date_from_iso, rating_half_stars, resolve, select_first, select_first_text, sel,
    year_from_text, year_from_title,
};
use super::paginate::collect_pages;
use super::selectors;
use super::LetterboxdScraper;

impl LetterboxdScraper {
    /// All reviews a user has published, in site order. Review text is
    /// whatever the listing page carries, which the site truncates with
    /// an ellipsis for long reviews.
    pub async fn fetch_reviews(&self, username: &str) -> Result<Vec<ReviewEntry>> {
        collect_pages(
            self.fetcher(),
            username,
            |page| self.page_url(&format!("{}/films/reviews", username), page),
            self.max_pages(),
            parse_reviews_page,
        )
        .await
    }
}

fn year_from_metadata(block: ElementRef<'_>) -> Option<i32> {
    select_first_text(block, selectors::REVIEW_YEAR).and_then(|t| year_from_text(&t))
}

fn year_from_headline(block: ElementRef<'_>) -> Option<i32> {
    select_first_text(block, selectors::REVIEW_TITLE_LINK).and_then(|t| year_from_title(&t))
}

fn review_date(block: ElementRef<'_>) -> Option<NaiveDate> {
    select_first(block, selectors::REVIEW_DATE)
        .and_then(|el| el.value().attr("datetime"))
        .and_then(|dt| dt.get(..10))
        .and_then(date_from_iso)
}

/// Extract one reviews page. Blocks without a resolvable film slug are
/// dropped.
pub(crate) fn parse_reviews_page(doc: &Html) -> Vec<ReviewEntry> {
    let block_sel = sel(selectors::REVIEW_BLOCK);
    let mut reviews = Vec::new();

    for block in doc.select(&block_sel) {
        let title_link = select_first(block, selectors::REVIEW_TITLE_LINK);
        let href = title_link.and_then(|el| el.value().attr("href"));
        let film_slug = href.and_then(slug_from_film_path);

        let Some(film_slug) = film_slug else {
            warn!("dropping review block without film slug");
            continue;
        };

        let film_title = title_link
            .map(super::extract::text_of)
            .unwrap_or_default();

        let review_text = block
            .select(&sel(selectors::REVIEW_TEXT))
            .map(super::extract::text_of)
            .collect::<Vec<_>>()
            .join("\n");

        reviews.push(ReviewEntry {
            film_title,
            film_year: resolve(block, &[year_from_metadata, year_from_headline]),
            film_slug,
            review_url: href.map(str::to_string),
            review_text,
            review_date: review_date(block),
            rating: rating_half_stars(block),
        });
    }

    reviews
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
    <html><body>
      <div class="film-detail-content">
        <h2 class="headline-2"><a href="/someone/film/heat-1995/">Heat</a></h2>
        <small class="metadata"><a>1995</a></small>
        <span class="rating" aria-valuenow="8"></span>
        <span class="date">Watched <time datetime="2023-04-02T10:00:00Z">02 Apr 2023</time></span>
        <div class="body-text"><p>Pacino and De Niro, finally.</p></div>
      </div>
      <div class="film-detail-content">
        <h2 class="headline-2"><a href="/someone/list/not-a-film/">A list</a></h2>
      </div>
    </body></html>"#;

    #[test]
    fn extracts_review_blocks() {
        let doc = Html::parse_document(PAGE);
        let reviews = parse_reviews_page(&doc);
        assert_eq!(reviews.len(), 1);

        let review = &reviews[0];
        assert_eq!(review.film_slug, "heat-1995");
        assert_eq!(review.film_title, "Heat");
        assert_eq!(review.film_year, Some(1995));
        assert_eq!(review.rating, Some(4.0));
        assert_eq!(review.review_date, NaiveDate::from_ymd_opt(2023, 4, 2));
        assert_eq!(review.review_text, "Pacino and De Niro, finally.");
        assert_eq!(review.review_url.as_deref(), Some("/someone/film/heat-1995/"));
    }

    #[test]
    fn slugless_blocks_are_dropped() {
        let doc = Html::parse_document(PAGE);
        let raw = doc.select(&sel(selectors::REVIEW_BLOCK)).count();
        assert_eq!(raw - parse_reviews_page(&doc).len(), 1);
    }
}
