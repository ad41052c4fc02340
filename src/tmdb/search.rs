use crate::tmdb::{
    models::{Movie, PaginatedResponse, Person},
    TmdbClient,
};

impl TmdbClient {
    /// Search for movies by title, optionally filtered to a release
    /// year.
    ///
    /// GET /search/movie
    pub async fn search_movie(
        &self,
        query: &str,
        year: Option<i32>,
    ) -> crate::tmdb::Result<PaginatedResponse<Movie>> {
        let url = self.url("/search/movie");
        let year_param = year.map(|y| y.to_string());

        let mut params = vec![
            ("api_key", self.api_key().to_string()),
            ("language", self.lang.clone()),
            ("query", query.to_string()),
            ("include_adult", "false".to_string()),
        ];
        if let Some(year) = year_param {
            params.push(("year", year));
        }

        let response = self.client().get(&url).query(&params).send().await?;
        self.handle_response(response).await
    }

    /// Search for people by name.
    ///
    /// GET /search/person
    pub async fn search_person(
        &self,
        query: &str,
    ) -> crate::tmdb::Result<PaginatedResponse<Person>> {
        let url = self.url("/search/person");
        let response = self
            .client()
            .get(&url)
            .query(&[
                ("api_key", self.api_key()),
                ("language", self.lang.as_str()),
                ("query", query),
                ("include_adult", "false"),
            ])
            .send()
            .await?;
        self.handle_response(response).await
    }
}
