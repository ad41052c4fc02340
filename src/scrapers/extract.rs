//! Shared field-extraction machinery.
//!
//! The site's markup has historically varied, so fields that moved
//! around are read through an ordered strategy chain: each strategy
//! inspects the element and returns an optional value, and the first
//! success wins. Extraction failures at the record level are the
//! caller's problem (drop the row, log a warning); this module only
//! answers "is the field there and what is it".

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::{Result, ScrapeError};

use super::selectors;

/// Parse a selector known at compile time. The constants in
/// `selectors.rs` are maintained to stay parseable.
pub(crate) fn sel(selector: &str) -> Selector {
    Selector::parse(selector).expect("static selector")
}

/// First-success-wins over an ordered strategy slice.
pub(crate) fn resolve<T>(
    el: ElementRef<'_>,
    strategies: &[fn(ElementRef<'_>) -> Option<T>],
) -> Option<T> {
    strategies.iter().find_map(|strategy| strategy(el))
}

/// Whole-document guard pass: private profiles and missing users are
/// detected by phrase before any field extraction runs, and map to
/// distinct error kinds rather than an empty record set.
pub(crate) fn check_page_guards(doc: &Html, subject: &str) -> Result<()> {
    let body: String = doc.root_element().text().collect();

    if body.contains(selectors::PHRASE_PRIVATE) {
        return Err(ScrapeError::Private(subject.to_string()));
    }
    if body.contains(selectors::PHRASE_NOT_FOUND)
        || body.contains(selectors::PHRASE_NOT_FOUND_PLAIN)
    {
        return Err(ScrapeError::NotFound(subject.to_string()));
    }
    Ok(())
}

/// Concatenated, trimmed text content of an element.
pub(crate) fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// First element matched under `scope`, by selector string.
pub(crate) fn select_first<'a>(scope: ElementRef<'a>, selector: &str) -> Option<ElementRef<'a>> {
    scope.select(&sel(selector)).next()
}

/// Trimmed text of the first match under `scope`, if non-empty.
pub(crate) fn select_first_text(scope: ElementRef<'_>, selector: &str) -> Option<String> {
    select_first(scope, selector)
        .map(text_of)
        .filter(|t| !t.is_empty())
}

fn aria_rating(scope: ElementRef<'_>) -> Option<f32> {
    select_first(scope, selectors::RATING_METER)
        .and_then(|el| el.value().attr(selectors::ATTR_ARIA_VALUENOW))
        .and_then(|v| v.trim().parse::<f32>().ok())
        .map(|v| v / 2.0)
}

fn input_rating(scope: ElementRef<'_>) -> Option<f32> {
    select_first(scope, selectors::RATING_INPUT)
        .and_then(|el| el.value().attr("value"))
        .and_then(|v| v.trim().parse::<f32>().ok())
        .map(|v| v / 2.0)
}

/// Star rating in half-star units. The markup carries a 0–10 integer
/// scale; displayed ratings are that value halved. An absent attribute
/// means unrated (`None`), which is distinct from an explicit 0.
pub(crate) fn rating_half_stars(scope: ElementRef<'_>) -> Option<f32> {
    resolve(scope, &[aria_rating, input_rating])
}

fn year_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\((\d{4})\)").expect("year regex"))
}

/// Release year out of a combined "Title (Year)" string.
pub(crate) fn year_from_title(text: &str) -> Option<i32> {
    year_regex()
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// A bare 4-digit year, as found in dedicated year cells/links.
pub(crate) fn year_from_text(text: &str) -> Option<i32> {
    let trimmed = text.trim();
    if trimmed.len() == 4 && trimmed.chars().all(|c| c.is_ascii_digit()) {
        trimmed.parse().ok()
    } else {
        None
    }
}

fn date_path_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/(\d{4})/(\d{2})/(\d{2})/?").expect("date path regex"))
}

/// Watched date from a day-link URL's embedded `/YYYY/MM/DD/` segment.
pub(crate) fn date_from_path(url: &str) -> Option<NaiveDate> {
    let caps = date_path_regex().captures(url)?;
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let day = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Watched date from an ISO `YYYY-MM-DD` attribute value.
pub(crate) fn date_from_iso(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(html: &str) -> Html {
        Html::parse_fragment(html)
    }

    #[test]
    fn aria_rating_scales_by_half() {
        let doc = fragment(r#"<td><span class="rating" aria-valuenow="7"></span></td>"#);
        let root = doc.root_element();
        assert_eq!(rating_half_stars(root), Some(3.5));

        let doc = fragment(r#"<td><span class="rating" aria-valuenow="10"></span></td>"#);
        assert_eq!(rating_half_stars(doc.root_element()), Some(5.0));
    }

    #[test]
    fn input_rating_is_fallback() {
        let doc = fragment(r#"<td><input class="rateit-field" value="9"></td>"#);
        assert_eq!(rating_half_stars(doc.root_element()), Some(4.5));
    }

    #[test]
    fn explicit_zero_is_not_unrated() {
        let doc = fragment(r#"<td><span class="rating" aria-valuenow="0"></span></td>"#);
        assert_eq!(rating_half_stars(doc.root_element()), Some(0.0));
    }

    #[test]
    fn absent_rating_is_none() {
        let doc = fragment(r#"<td><span class="other"></span></td>"#);
        assert_eq!(rating_half_stars(doc.root_element()), None);
    }

    #[test]
    fn year_out_of_combined_title() {
        assert_eq!(year_from_title("The Matrix (1999)"), Some(1999));
        assert_eq!(year_from_title("No year here"), None);
    }

    #[test]
    fn year_from_dedicated_cell() {
        assert_eq!(year_from_text(" 2004 "), Some(2004));
        assert_eq!(year_from_text("04"), None);
        assert_eq!(year_from_text("20045"), None);
    }

    #[test]
    fn date_out_of_day_link() {
        assert_eq!(
            date_from_path("/someone/films/diary/for/2023/05/12/"),
            NaiveDate::from_ymd_opt(2023, 5, 12)
        );
        assert_eq!(date_from_path("/someone/films/"), None);
    }

    #[test]
    fn guard_detects_private_profile() {
        let doc = Html::parse_document(
            "<html><body><p>This profile is private. Sorry.</p></body></html>",
        );
        let err = check_page_guards(&doc, "someone").unwrap_err();
        assert!(matches!(err, ScrapeError::Private(_)));
    }

    #[test]
    fn guard_detects_missing_user() {
        let doc = Html::parse_document(
            "<html><body><h1>Sorry, we can't find the page you requested.</h1></body></html>",
        );
        let err = check_page_guards(&doc, "ghost").unwrap_err();
        assert!(matches!(err, ScrapeError::NotFound(_)));
    }

    #[test]
    fn guard_passes_ordinary_page() {
        let doc = Html::parse_document("<html><body><p>Films.</p></body></html>");
        assert!(check_page_guards(&doc, "someone").is_ok());
    }
}
