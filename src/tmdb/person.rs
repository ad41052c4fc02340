use crate::tmdb::{models::PersonDetails, TmdbClient};

impl TmdbClient {
    /// Get person details.
    ///
    /// GET /person/{person_id}
    pub async fn person_details(&self, person_id: i64) -> crate::tmdb::Result<PersonDetails> {
        let url = self.url(&format!("/person/{}", person_id));
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
