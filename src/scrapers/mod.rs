//! Letterboxd scraping pipeline.
//!
//! One `LetterboxdScraper` serves every page type. Each `fetch_*`
//! method is one collaborator interface of the core: fetch pages, run
//! the extractor, paginate, and hand back normalized records. Nothing
//! here caches or persists; every call is parameterized solely by its
//! username or slug.

use std::time::Duration;

pub mod diary;
pub mod extract;
pub mod films;
pub mod http;
pub mod paginate;
pub mod profile;
pub mod reviews;
mod selectors;

pub use http::{HttpClient, PageFetcher, PageResponse};

use crate::config::Settings;

const BASE_URL: &str = "https://letterboxd.com";

pub struct LetterboxdScraper {
    fetcher: Box<dyn PageFetcher>,
    base_url: String,
    max_pages: u32,
}

impl LetterboxdScraper {
    /// Build a scraper over a real HTTP client configured from
    /// settings.
    pub fn new(settings: &Settings) -> Self {
        let client = HttpClient::new(
            &settings.user_agent,
            Duration::from_secs(settings.request_timeout),
            Duration::from_millis(settings.request_delay_ms),
        );
        Self::with_fetcher(Box::new(client), settings.max_pages)
    }

    /// Build a scraper over any page source. This is the seam tests use
    /// to run the pipeline against canned pages.
    pub fn with_fetcher(fetcher: Box<dyn PageFetcher>, max_pages: u32) -> Self {
        Self {
            fetcher,
            base_url: BASE_URL.to_string(),
            max_pages,
        }
    }

    pub(crate) fn fetcher(&self) -> &dyn PageFetcher {
        self.fetcher.as_ref()
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn max_pages(&self) -> u32 {
        self.max_pages
    }

    /// URL for page N of a paginated listing under the site root.
    pub(crate) fn page_url(&self, path: &str, page: u32) -> String {
        format!("{}/{}/page/{}/", self.base_url, path, page)
    }
}
