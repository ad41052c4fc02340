use crate::tmdb::{
    models::{Credits, Movie, MovieDetails, PaginatedResponse, Video, VideoList},
    TmdbClient,
};

impl TmdbClient {
    /// Get movie details.
    ///
    /// GET /movie/{movie_id}
    pub async fn movie_details(&self, movie_id: i64) -> crate::tmdb::Result<MovieDetails> {
        let url = self.url(&format!("/movie/{}", movie_id));
        let response = self
            .client()
            .get(&url)
            .query(&[
                ("api_key", self.api_key()),
                ("language", self.lang.as_str()),
            ])
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Get cast and crew for a movie.
    ///
    /// GET /movie/{movie_id}/credits
    pub async fn movie_credits(&self, movie_id: i64) -> crate::tmdb::Result<Credits> {
        let url = self.url(&format!("/movie/{}/credits", movie_id));
        let response = self
            .client()
            .get(&url)
            .query(&[
                ("api_key", self.api_key()),
                ("language", self.lang.as_str()),
            ])
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Get trailers and other videos for a movie.
    ///
    /// GET /movie/{movie_id}/videos
    pub async fn movie_videos(&self, movie_id: i64) -> crate::tmdb::Result<Vec<Video>> {
        let url = self.url(&format!("/movie/{}/videos", movie_id));
        let response = self
            .client()
            .get(&url)
            .query(&[
                ("api_key", self.api_key()),
                ("language", self.lang.as_str()),
            ])
            .send()
            .await?;
        let list: VideoList = self.handle_response(response).await?;
        Ok(list.results)
    }

    /// Get movies similar to the given one.
    ///
    /// GET /movie/{movie_id}/similar
    pub async fn similar_movies(
        &self,
        movie_id: i64,
    ) -> crate::tmdb::Result<PaginatedResponse<Movie>> {
        let url = self.url(&format!("/movie/{}/similar", movie_id));
        let response = self
            .client()
            .get(&url)
            .query(&[
                ("api_key", self.api_key()),
                ("language", self.lang.as_str()),
            ])
            .send()
            .await?;
        self.handle_response(response).await
    }
}
