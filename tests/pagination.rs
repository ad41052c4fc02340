//! Pagination behavior over canned pages: termination rules, partial
//! results, and the page ceiling.

use std::collections::HashMap;

use async_trait::async_trait;
use boxdbot::error::{Result, ScrapeError};
use boxdbot::scrapers::{LetterboxdScraper, PageFetcher, PageResponse};

enum MockPage {
    Body(String),
    Error,
}

struct MockFetcher {
    pages: HashMap<String, MockPage>,
}

impl MockFetcher {
    fn new() -> Self {
        Self {
            pages: HashMap::new(),
        }
    }

    fn diary_page(mut self, user: &str, n: u32, rows: &[(&str, &str)]) -> Self {
        let rows_html: String = rows
            .iter()
            .map(|(viewing_id, slug)| {
                format!(
                    r#"<tr class="diary-entry-row" data-viewing-id="{viewing_id}" data-viewing-date="2023-05-12">
                         <td class="td-film-details">
                           <div class="film-poster" data-film-slug="{slug}"></div>
                           <h3><a href="/{user}/film/{slug}/">{slug}</a></h3>
                         </td>
                       </tr>"#
                )
            })
            .collect();
        self.pages.insert(
            diary_url(user, n),
            MockPage::Body(format!("<html><body><table>{rows_html}</table></body></html>")),
        );
        self
    }

    fn empty_page(mut self, user: &str, n: u32) -> Self {
        self.pages.insert(
            diary_url(user, n),
            MockPage::Body("<html><body><p>No films yet.</p></body></html>".to_string()),
        );
        self
    }

    fn private_page(mut self, user: &str, n: u32) -> Self {
        self.pages.insert(
            diary_url(user, n),
            MockPage::Body(
                "<html><body><p>This profile is private.</p></body></html>".to_string(),
            ),
        );
        self
    }

    fn error_page(mut self, user: &str, n: u32) -> Self {
        self.pages.insert(diary_url(user, n), MockPage::Error);
        self
    }
}

fn diary_url(user: &str, n: u32) -> String {
    format!("https://letterboxd.com/{user}/films/diary/page/{n}/")
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch_page(&self, url: &str) -> Result<PageResponse> {
        match self.pages.get(url) {
            Some(MockPage::Body(body)) => Ok(PageResponse::Ok(body.clone())),
            Some(MockPage::Error) => Err(ScrapeError::UnexpectedStatus {
                status: 503,
                url: url.to_string(),
            }),
            // Anything not configured is a 404, like pages past the end.
            None => Ok(PageResponse::NotFound),
        }
    }
}

fn scraper(fetcher: MockFetcher, max_pages: u32) -> LetterboxdScraper {
    LetterboxdScraper::with_fetcher(Box::new(fetcher), max_pages)
}

#[tokio::test]
async fn three_page_diary_concatenates_in_page_order() {
    let fetcher = MockFetcher::new()
        .diary_page("alice", 1, &[("v1", "the-matrix"), ("v2", "heat-1995")])
        .diary_page("alice", 2, &[("v3", "alien"), ("v4", "stalker")])
        .empty_page("alice", 3);

    let entries = scraper(fetcher, 50).fetch_diary("alice").await.unwrap();
    let ids: Vec<&str> = entries.iter().map(|e| e.viewing_id.as_str()).collect();
    assert_eq!(ids, vec!["v1", "v2", "v3", "v4"]);
}

#[tokio::test]
async fn duplicate_viewing_ids_are_deduplicated() {
    let fetcher = MockFetcher::new()
        .diary_page("alice", 1, &[("v1", "the-matrix"), ("v2", "heat-1995")])
        .diary_page("alice", 2, &[("v2", "heat-1995"), ("v3", "alien")])
        .empty_page("alice", 3);

    let entries = scraper(fetcher, 50).fetch_diary("alice").await.unwrap();
    let ids: Vec<&str> = entries.iter().map(|e| e.viewing_id.as_str()).collect();
    assert_eq!(ids, vec!["v1", "v2", "v3"]);
}

#[tokio::test]
async fn late_404_is_normal_termination() {
    let fetcher = MockFetcher::new().diary_page("alice", 1, &[("v1", "the-matrix")]);

    let entries = scraper(fetcher, 50).fetch_diary("alice").await.unwrap();
    assert_eq!(entries.len(), 1);
}

#[tokio::test]
async fn missing_user_raises_not_found() {
    let fetcher = MockFetcher::new();
    let err = scraper(fetcher, 50).fetch_diary("ghost").await.unwrap_err();
    assert!(matches!(err, ScrapeError::NotFound(_)));
}

#[tokio::test]
async fn private_profile_raises_with_no_partial_data() {
    let fetcher = MockFetcher::new().private_page("bob", 1);
    let err = scraper(fetcher, 50).fetch_diary("bob").await.unwrap_err();
    assert!(matches!(err, ScrapeError::Private(_)));
}

#[tokio::test]
async fn mid_loop_failure_returns_accumulated_entries() {
    let fetcher = MockFetcher::new()
        .diary_page("alice", 1, &[("v1", "the-matrix"), ("v2", "heat-1995")])
        .error_page("alice", 2);

    let entries = scraper(fetcher, 50).fetch_diary("alice").await.unwrap();
    assert_eq!(entries.len(), 2);
}

#[tokio::test]
async fn first_page_failure_propagates() {
    let fetcher = MockFetcher::new().error_page("alice", 1);
    let err = scraper(fetcher, 50).fetch_diary("alice").await.unwrap_err();
    assert!(matches!(err, ScrapeError::UnexpectedStatus { status: 503, .. }));
}

#[tokio::test]
async fn page_ceiling_raises_distinct_error() {
    let fetcher = MockFetcher::new()
        .diary_page("alice", 1, &[("v1", "a")])
        .diary_page("alice", 2, &[("v2", "b")])
        .diary_page("alice", 3, &[("v3", "c")]);

    let err = scraper(fetcher, 3).fetch_diary("alice").await.unwrap_err();
    assert!(matches!(err, ScrapeError::PageLimitExceeded { limit: 3, .. }));
}
