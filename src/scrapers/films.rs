//! Poster-list pages (favorites, likes, watchlist) and the film-detail
//! page.

use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Html};
use tracing::warn;

use crate::error::Result;
use crate::models::{FavoriteFilm, FilmDetails, LikedFilm};

use super::diary::slug_from_film_path;
use super::extract::{
    check_page_guards, select_first, select_first_text, sel, text_of, year_from_title,
};
use super::http::{PageFetcher, PageResponse};
use super::paginate::collect_pages;
use super::selectors;
use super::LetterboxdScraper;

/// How many favorites the profile strip is capped to.
const FAVORITES_CAP: usize = 4;

/// The common shape of one poster tile, before it becomes a favorite or
/// a liked film.
struct PosterItem {
    title: String,
    year: Option<i32>,
    slug: String,
}

fn parse_poster_item(el: ElementRef<'_>) -> Option<PosterItem> {
    let slug = el
        .value()
        .attr(selectors::ATTR_FILM_SLUG)
        .map(str::to_string)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            el.value()
                .attr(selectors::ATTR_TARGET_LINK)
                .and_then(slug_from_film_path)
        })?;

    let alt = select_first(el, selectors::POSTER_IMG)
        .and_then(|img| img.value().attr("alt"))
        .map(str::trim)
        .unwrap_or_default();

    let year = year_from_title(alt);
    let title = match alt.rsplit_once(" (") {
        Some((name, _)) if year.is_some() => name.to_string(),
        _ => alt.to_string(),
    };

    Some(PosterItem { title, year, slug })
}

impl LetterboxdScraper {
    /// The favorites strip from a user's profile page, capped at the
    /// first four found, site order preserved.
    pub async fn fetch_favorites(&self, username: &str) -> Result<Vec<FavoriteFilm>> {
        let url = format!("{}/{}/", self.base_url(), username);
        let body = match self.fetcher().fetch_page(&url).await? {
            PageResponse::Ok(body) => body,
            PageResponse::NotFound => {
                return Err(crate::error::ScrapeError::NotFound(username.to_string()))
            }
        };

        let doc = Html::parse_document(&body);
        check_page_guards(&doc, username)?;
        Ok(parse_favorites(&doc, self.base_url()))
    }

    /// Every film the user has liked, accumulated across pages in site
    /// order.
    pub async fn fetch_liked_films(&self, username: &str) -> Result<Vec<LikedFilm>> {
        let base = self.base_url().to_string();
        collect_pages(
            self.fetcher(),
            username,
            |page| self.page_url(&format!("{}/likes/films", username), page),
            self.max_pages(),
            move |doc| parse_likes_page(doc, &base),
        )
        .await
    }

    /// Slugs of every film on the user's watchlist, in site order.
    pub async fn fetch_watchlist(&self, username: &str) -> Result<Vec<String>> {
        collect_pages(
            self.fetcher(),
            username,
            |page| self.page_url(&format!("{}/watchlist", username), page),
            self.max_pages(),
            parse_watchlist_page,
        )
        .await
    }

    /// Full detail record for one film, or `None` when the slug does
    /// not resolve.
    pub async fn fetch_film_details(&self, slug: &str) -> Result<Option<FilmDetails>> {
        let url = format!("{}/film/{}/", self.base_url(), slug);
        let body = match self.fetcher().fetch_page(&url).await? {
            PageResponse::Ok(body) => body,
            PageResponse::NotFound => return Ok(None),
        };

        let doc = Html::parse_document(&body);
        check_page_guards(&doc, slug)?;
        Ok(Some(parse_film_page(&doc, slug)))
    }
}

pub(crate) fn parse_favorites(doc: &Html, base_url: &str) -> Vec<FavoriteFilm> {
    doc.select(&sel(selectors::FAVORITES_SECTION))
        .filter_map(|el| parse_poster_item(el))
        .take(FAVORITES_CAP)
        .map(|item| FavoriteFilm {
            url: format!("{}/film/{}/", base_url, item.slug),
            title: item.title,
            year: item.year,
            slug: item.slug,
        })
        .collect()
}

pub(crate) fn parse_likes_page(doc: &Html, base_url: &str) -> Vec<LikedFilm> {
    doc.select(&sel(selectors::POSTER_ITEM))
        .filter_map(|el| {
            let item = parse_poster_item(el);
            if item.is_none() {
                warn!("dropping liked-film tile without slug");
            }
            item
        })
        .map(|item| LikedFilm {
            url: format!("{}/film/{}/", base_url, item.slug),
            title: item.title,
            year: item.year,
            slug: item.slug,
        })
        .collect()
}

pub(crate) fn parse_watchlist_page(doc: &Html) -> Vec<String> {
    doc.select(&sel(selectors::POSTER_ITEM))
        .filter_map(|el| parse_poster_item(el))
        .map(|item| item.slug)
        .collect()
}

fn runtime_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\s*min").expect("runtime regex"))
}

pub(crate) fn parse_film_page(doc: &Html, slug: &str) -> FilmDetails {
    let root = doc.root_element();

    let title = select_first_text(root, selectors::FILM_TITLE).unwrap_or_default();
    let year = select_first_text(root, selectors::FILM_YEAR_LINK)
        .and_then(|t| super::extract::year_from_text(&t));

    let directors = root
        .select(&sel(selectors::FILM_DIRECTOR))
        .map(text_of)
        .filter(|name| !name.is_empty())
        .collect();

    let runtime_minutes = select_first_text(root, selectors::FILM_RUNTIME)
        .and_then(|t| runtime_regex().captures(&t).and_then(|c| c[1].parse().ok()));

    let poster_url = select_first(root, selectors::FILM_POSTER)
        .and_then(|img| img.value().attr("src"))
        .map(str::to_string);

    FilmDetails {
        slug: slug.to_string(),
        title,
        year,
        tagline: select_first_text(root, selectors::FILM_TAGLINE),
        synopsis: select_first_text(root, selectors::FILM_SYNOPSIS),
        directors,
        runtime_minutes,
        poster_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIKES_PAGE: &str = r#"
    <html><body><ul>
      <li class="poster-container">
        <div class="film-poster" data-film-slug="the-matrix" data-target-link="/film/the-matrix/">
          <img alt="The Matrix (1999)">
        </div>
      </li>
      <li class="poster-container">
        <div class="film-poster" data-target-link="/film/heat-1995/">
          <img alt="Heat (1995)">
        </div>
      </li>
      <li class="poster-container">
        <div class="film-poster"><img alt="No Slug Anywhere"></div>
      </li>
    </ul></body></html>"#;

    #[test]
    fn likes_use_slug_fallback_and_drop_slugless() {
        let doc = Html::parse_document(LIKES_PAGE);
        let likes = parse_likes_page(&doc, "https://letterboxd.com");
        assert_eq!(likes.len(), 2);
        assert_eq!(likes[0].slug, "the-matrix");
        assert_eq!(likes[0].title, "The Matrix");
        assert_eq!(likes[0].year, Some(1999));
        assert_eq!(likes[1].slug, "heat-1995");
        assert_eq!(likes[1].url, "https://letterboxd.com/film/heat-1995/");
    }

    #[test]
    fn favorites_are_capped_at_four() {
        let tiles: String = (1..=6)
            .map(|i| {
                format!(
                    r#"<div class="film-poster" data-film-slug="film-{i}"><img alt="Film {i}"></div>"#
                )
            })
            .collect();
        let page = format!(r#"<html><body><section id="favourites">{tiles}</section></body></html>"#);
        let doc = Html::parse_document(&page);
        let favorites = parse_favorites(&doc, "https://letterboxd.com");
        assert_eq!(favorites.len(), 4);
        assert_eq!(favorites[0].slug, "film-1");
        assert_eq!(favorites[3].slug, "film-4");
    }

    #[test]
    fn watchlist_yields_slugs_in_order() {
        let doc = Html::parse_document(LIKES_PAGE);
        assert_eq!(parse_watchlist_page(&doc), vec!["the-matrix", "heat-1995"]);
    }

    #[test]
    fn film_page_extracts_detail_fields() {
        let page = r#"
        <html><body>
          <section class="film-header">
            <h1>Heat</h1>
            <small class="number"><a href="/films/year/1995/">1995</a></small>
          </section>
          <section>
            <h4 class="tagline">A Los Angeles crime saga.</h4>
            <div class="truncate"><p>Obsessive master thief Neil McCauley leads a top-notch crew.</p></div>
            <span class="directorlist"><a class="contributor">Michael Mann</a></span>
            <p class="text-link">170 mins &nbsp; More at IMDb</p>
          </section>
          <section class="poster-list"><img src="https://a.ltrbxd.com/heat.jpg"></section>
        </body></html>"#;
        let doc = Html::parse_document(page);
        let film = parse_film_page(&doc, "heat-1995");
        assert_eq!(film.title, "Heat");
        assert_eq!(film.year, Some(1995));
        assert_eq!(film.tagline.as_deref(), Some("A Los Angeles crime saga."));
        assert_eq!(film.directors, vec!["Michael Mann"]);
        assert_eq!(film.runtime_minutes, Some(170));
        assert_eq!(film.poster_url.as_deref(), Some("https://a.ltrbxd.com/heat.jpg"));
    }
}
