use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub original_title: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub original_title: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub runtime: Option<i64>,
    pub tagline: Option<String>,
    pub imdb_id: Option<String>,
    pub homepage: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastMember {
    pub id: i64,
    pub name: String,
    pub character: Option<String>,
    #[serde(default)]
    pub order: i64,
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: i64,
    pub name: String,
    pub job: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

impl Credits {
    /// Director names in credit order.
    pub fn directors(&self) -> Vec<String> {
        self.crew
            .iter()
            .filter(|c| c.job.as_deref() == Some("Director"))
            .map(|c| c.name.clone())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub key: String,
    pub name: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
    #[serde(default)]
    pub official: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub profile_path: Option<String>,
    pub known_for_department: Option<String>,
    #[serde(default)]
    pub popularity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonDetails {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub biography: String,
    pub birthday: Option<String>,
    pub deathday: Option<String>,
    pub place_of_birth: Option<String>,
    pub profile_path: Option<String>,
    pub known_for_department: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub page: i64,
    pub results: Vec<T>,
    pub total_pages: i64,
    pub total_results: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credits_filter_directors_in_order() {
        let credits = Credits {
            cast: vec![],
            crew: vec![
                CrewMember {
                    id: 1,
                    name: "Lilly Wachowski".into(),
                    job: Some("Director".into()),
                    department: Some("Directing".into()),
                },
                CrewMember {
                    id: 2,
                    name: "Bill Pope".into(),
                    job: Some("Director of Photography".into()),
                    department: Some("Camera".into()),
                },
                CrewMember {
                    id: 3,
                    name: "Lana Wachowski".into(),
                    job: Some("Director".into()),
                    department: Some("Directing".into()),
                },
            ],
        };
        assert_eq!(credits.directors(), vec!["Lilly Wachowski", "Lana Wachowski"]);
    }

    #[test]
    fn search_payload_deserializes_with_missing_optionals() {
        let body = r#"{
            "page": 1,
            "results": [{"id": 603, "title": "The Matrix", "poster_path": "/m.jpg",
                         "backdrop_path": null, "release_date": "1999-03-30"}],
            "total_pages": 1,
            "total_results": 1
        }"#;
        let parsed: PaginatedResponse<Movie> = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.results[0].id, 603);
        assert_eq!(parsed.results[0].vote_count, 0);
        assert!(parsed.results[0].genre_ids.is_empty());
    }
}
