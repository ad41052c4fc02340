//! Movie-quote feed.
//!
//! TMDB has no quotes endpoint; the bot's quote command is fed by a
//! public movie-quote JSON API consumed with the same GET-and-decode
//! idiom as the rest of the client. Best-effort: callers degrade to
//! nothing when this feed is down.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::tmdb::error::TmdbError;

const QUOTE_BASE_URL: &str = "https://movie-quote-api.herokuapp.com/v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieQuote {
    pub quote: String,
    pub role: String,
    pub show: String,
}

pub struct QuoteClient {
    client: Client,
    base_url: String,
}

impl QuoteClient {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: QUOTE_BASE_URL.to_string(),
        }
    }

    /// One random quote from the feed.
    pub async fn random_quote(&self) -> crate::tmdb::Result<MovieQuote> {
        let url = format!("{}/quote/", self.base_url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(TmdbError::Api {
                status_code: status.as_u16(),
                message: body,
            });
        }
        serde_json::from_str(&body).map_err(|e| TmdbError::Json {
            path: "quote".to_string(),
            source: e,
        })
    }
}
