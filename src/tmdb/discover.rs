use crate::tmdb::{
    models::{Genre, GenreList, Movie, PaginatedResponse},
    TmdbClient,
};

/// Filters for the discover endpoint. Unset fields are omitted from the
/// query string.
#[derive(Debug, Clone, Default)]
pub struct DiscoverParams {
    pub with_genres: Option<String>,
    pub year: Option<i32>,
    pub vote_average_gte: Option<f64>,
    pub sort_by: Option<String>,
    pub page: Option<u32>,
}

impl DiscoverParams {
    pub fn with_genres(mut self, genres: impl Into<String>) -> Self {
        self.with_genres = Some(genres.into());
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn vote_average_gte(mut self, vote: f64) -> Self {
        self.vote_average_gte = Some(vote);
        self
    }

    pub fn sort_by(mut self, sort: impl Into<String>) -> Self {
        self.sort_by = Some(sort.into());
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    fn into_query(self, api_key: &str, lang: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("api_key", api_key.to_string()),
            ("language", lang.to_string()),
            ("include_adult", "false".to_string()),
        ];
        if let Some(genres) = self.with_genres {
            params.push(("with_genres", genres));
        }
        if let Some(year) = self.year {
            params.push(("primary_release_year", year.to_string()));
        }
        if let Some(vote) = self.vote_average_gte {
            params.push(("vote_average.gte", vote.to_string()));
        }
        if let Some(sort) = self.sort_by {
            params.push(("sort_by", sort));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        params
    }
}

impl TmdbClient {
    /// The canonical movie genre list.
    ///
    /// GET /genre/movie/list
    pub async fn genre_list(&self) -> crate::tmdb::Result<Vec<Genre>> {
        let url = self.url("/genre/movie/list");
        let response = self
            .client()
            .get(&url)
            .query(&[
                ("api_key", self.api_key()),
                ("language", self.lang.as_str()),
            ])
            .send()
            .await?;
        let list: GenreList = self.handle_response(response).await?;
        Ok(list.genres)
    }

    /// Discover movies by filter.
    ///
    /// GET /discover/movie
    pub async fn discover_movies(
        &self,
        params: DiscoverParams,
    ) -> crate::tmdb::Result<PaginatedResponse<Movie>> {
        let url = self.url("/discover/movie");
        let query = params.into_query(self.api_key(), &self.lang);
        let response = self.client().get(&url).query(&query).send().await?;
        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_filters_are_omitted() {
        let params = DiscoverParams::default()
            .with_genres("28,12")
            .year(1999)
            .into_query("k", "en-US");
        let keys: Vec<_> = params.iter().map(|(k, _)| *k).collect();
        assert!(keys.contains(&"with_genres"));
        assert!(keys.contains(&"primary_release_year"));
        assert!(!keys.contains(&"sort_by"));
        assert!(!keys.contains(&"page"));
    }
}
