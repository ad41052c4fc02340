//! Profile page extraction.
//!
//! Every statistic depends on its page section being present, so each
//! field resolves independently and absent sections simply stay `None`.

use scraper::Html;

use crate::error::Result;
use crate::models::ProfileStats;

use super::extract::{check_page_guards, select_first, select_first_text, sel, text_of};
use super::films::parse_favorites;
use super::http::{PageFetcher, PageResponse};
use super::selectors;
use super::LetterboxdScraper;

impl LetterboxdScraper {
    /// Header statistics, tags, and the favorites strip from a user's
    /// profile page.
    pub async fn fetch_profile_stats(&self, username: &str) -> Result<ProfileStats> {
        let url = format!("{}/{}/", self.base_url(), username);
        let body = match self.fetcher().fetch_page(&url).await? {
            PageResponse::Ok(body) => body,
            PageResponse::NotFound => {
                return Err(crate::error::ScrapeError::NotFound(username.to_string()))
            }
        };

        let doc = Html::parse_document(&body);
        check_page_guards(&doc, username)?;
        Ok(parse_profile_page(&doc, username, self.base_url()))
    }
}

/// "1,234" → 1234. The site formats counts with thousands separators.
fn parse_count(text: &str) -> Option<u32> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}

pub(crate) fn parse_profile_page(doc: &Html, username: &str, base_url: &str) -> ProfileStats {
    let mut stats = ProfileStats {
        username: username.to_string(),
        profile_url: format!("{}/{}/", base_url, username),
        ..Default::default()
    };

    for block in doc.select(&sel(selectors::PROFILE_STATISTIC)) {
        let value = select_first_text(block, selectors::PROFILE_STAT_VALUE)
            .as_deref()
            .and_then(parse_count);
        let definition = select_first_text(block, selectors::PROFILE_STAT_DEFINITION)
            .unwrap_or_default()
            .to_lowercase();

        match definition.as_str() {
            "films" => stats.total_films = value,
            "this year" => stats.films_this_year = value,
            "following" => stats.following = value,
            "followers" => stats.followers = value,
            "watchlist" => stats.watchlist_count = value,
            _ => {}
        }
    }

    stats.tags = doc
        .select(&sel(selectors::PROFILE_TAG))
        .map(text_of)
        .filter(|t| !t.is_empty())
        .collect();

    stats.avatar_url = select_first(doc.root_element(), selectors::PROFILE_AVATAR)
        .and_then(|img| img.value().attr("src"))
        .map(str::to_string);

    stats.favorites = parse_favorites(doc, base_url);
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
    <html><body>
      <div class="profile-avatar"><img src="https://a.ltrbxd.com/avatar.jpg"></div>
      <div class="profile-stats">
        <h4 class="profile-statistic"><span class="value">1,234</span> <span class="definition">Films</span></h4>
        <h4 class="profile-statistic"><span class="value">87</span> <span class="definition">This year</span></h4>
        <h4 class="profile-statistic"><span class="value">45</span> <span class="definition">Following</span></h4>
        <h4 class="profile-statistic"><span class="value">52</span> <span class="definition">Followers</span></h4>
      </div>
      <div class="profile-tags"><a>35mm</a><a>cinema</a></div>
      <section id="favourites">
        <div class="film-poster" data-film-slug="heat-1995"><img alt="Heat (1995)"></div>
      </section>
    </body></html>"#;

    #[test]
    fn stats_resolve_independently() {
        let doc = Html::parse_document(PAGE);
        let stats = parse_profile_page(&doc, "someone", "https://letterboxd.com");

        assert_eq!(stats.total_films, Some(1234));
        assert_eq!(stats.films_this_year, Some(87));
        assert_eq!(stats.following, Some(45));
        assert_eq!(stats.followers, Some(52));
        assert_eq!(stats.watchlist_count, None);
        assert_eq!(stats.tags, vec!["35mm", "cinema"]);
        assert_eq!(stats.avatar_url.as_deref(), Some("https://a.ltrbxd.com/avatar.jpg"));
        assert_eq!(stats.profile_url, "https://letterboxd.com/someone/");
        assert_eq!(stats.favorites.len(), 1);
        assert_eq!(stats.favorites[0].slug, "heat-1995");
    }

    #[test]
    fn empty_page_yields_all_absent() {
        let doc = Html::parse_document("<html><body></body></html>");
        let stats = parse_profile_page(&doc, "someone", "https://letterboxd.com");
        assert_eq!(stats.total_films, None);
        assert!(stats.tags.is_empty());
        assert!(stats.favorites.is_empty());
    }
}
