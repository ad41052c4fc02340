use thiserror::Error;

#[derive(Debug, Error)]
pub enum TmdbError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("api returned {status_code}: {message}")]
    Api { status_code: u16, message: String },

    #[error("json decode failed at {path}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
