//! Page loop shared by every multi-page scrape.
//!
//! Pages are fetched strictly one at a time, in order: page N+1's
//! existence is only knowable after page N is inspected, and the
//! inter-request delay lives in the client. Termination rules:
//!
//! - a page that extracts zero records ends the loop normally;
//! - HTTP 404 on page 1 means the subject does not exist; on any later
//!   page it is the ordinary end of pagination;
//! - a fetch failure on page 1 propagates; on a later page the loop
//!   logs it and returns whatever was accumulated;
//! - the page ceiling aborts with a distinct error instead of letting a
//!   markup regression turn into an unbounded crawl.

use scraper::Html;
use tracing::{debug, warn};

use crate::error::{Result, ScrapeError};

use super::extract::check_page_guards;
use super::http::{PageFetcher, PageResponse};

/// Fetch and extract pages 1, 2, 3… until a termination rule fires.
///
/// `page_url` renders the URL for a 1-based page number; `parse`
/// extracts this page's records (malformed rows are its business to
/// drop). Records accumulate in page order.
pub async fn collect_pages<T, U, P>(
    fetcher: &dyn PageFetcher,
    subject: &str,
    page_url: U,
    max_pages: u32,
    parse: P,
) -> Result<Vec<T>>
where
    U: Fn(u32) -> String,
    P: Fn(&Html) -> Vec<T>,
{
    let mut collected = Vec::new();

    for page in 1..=max_pages {
        let url = page_url(page);

        let body = match fetcher.fetch_page(&url).await {
            Ok(PageResponse::Ok(body)) => body,
            Ok(PageResponse::NotFound) if page == 1 => {
                return Err(ScrapeError::NotFound(subject.to_string()));
            }
            Ok(PageResponse::NotFound) => {
                debug!(subject, page, "pagination ended on 404");
                return Ok(collected);
            }
            Err(e) if page == 1 => return Err(e),
            Err(e) => {
                warn!(subject, page, error = %e, "fetch failed mid-pagination, returning partial results");
                return Ok(collected);
            }
        };

        let doc = Html::parse_document(&body);
        check_page_guards(&doc, subject)?;

        let records = parse(&doc);
        if records.is_empty() {
            debug!(subject, page, "pagination ended on empty page");
            return Ok(collected);
        }

        debug!(subject, page, count = records.len(), "extracted page");
        collected.extend(records);
    }

    Err(ScrapeError::PageLimitExceeded {
        limit: max_pages,
        url: page_url(max_pages),
    })
}
