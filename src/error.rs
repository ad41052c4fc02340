//! Error kinds for the scraping core.
//!
//! Page-level failures propagate as typed errors so callers can translate
//! them into user-facing messages. Record-level extraction gaps are not
//! errors at all: malformed rows are dropped with a warning and shrink
//! the result set.

use thiserror::Error;

/// Errors raised by the Letterboxd scraping pipeline.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The user or film does not exist (HTTP 404 on the first page, or a
    /// known not-found phrase in the page body).
    #[error("not found: {0}")]
    NotFound(String),

    /// The profile exists but is access-restricted.
    #[error("profile is private: {0}")]
    Private(String),

    /// DNS/socket-level failure reaching the site.
    #[error("connection failed for {url}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Any HTTP status other than 200 or 404.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The pagination ceiling was hit before a terminating page appeared.
    /// Either the account is pathologically large or the empty-page
    /// detector no longer matches the site's markup.
    #[error("pagination limit of {limit} pages exceeded for {url}")]
    PageLimitExceeded { limit: u32, url: String },
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
