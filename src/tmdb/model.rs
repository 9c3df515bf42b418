use serde::Deserialize;

const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// A single movie as returned by the TMDB API.
///
/// TMDB omits or nulls most fields for obscure titles, so everything beyond
/// `id` and `title` falls back to an empty default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub original_language: String,
}

impl Movie {
    /// Release year, when a release date is known.
    #[must_use]
    pub fn year(&self) -> Option<&str> {
        self.release_date.as_deref().and_then(|date| date.get(..4))
    }

    /// Full poster image URL, when the movie has a poster.
    #[must_use]
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|path| format!("{POSTER_BASE_URL}{path}"))
    }
}

/// One page of movie results.
#[derive(Debug, Clone, Deserialize)]
pub struct MoviePage {
    #[serde(default)]
    pub results: Vec<Movie>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_a_full_record() {
        let json = r#"{
            "id": 27205,
            "title": "Inception",
            "overview": "Cobb steals secrets from within the subconscious.",
            "poster_path": "/oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg",
            "release_date": "2010-07-15",
            "vote_average": 8.369,
            "original_language": "en"
        }"#;

        let movie: Movie = serde_json::from_str(json).unwrap();

        assert_eq!(movie.id, 27205);
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.year(), Some("2010"));
        assert_eq!(
            movie.poster_url().unwrap(),
            "https://image.tmdb.org/t/p/w500/oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg"
        );
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let json = r#"{"id": 1, "title": "Obscure"}"#;

        let movie: Movie = serde_json::from_str(json).unwrap();

        assert_eq!(movie.overview, "");
        assert_eq!(movie.poster_path, None);
        assert_eq!(movie.year(), None);
        assert_eq!(movie.poster_url(), None);
        assert_eq!(movie.vote_average, 0.0);
    }

    #[test]
    fn null_poster_path_is_accepted() {
        let json = r#"{"id": 1, "title": "Obscure", "poster_path": null}"#;

        let movie: Movie = serde_json::from_str(json).unwrap();

        assert_eq!(movie.poster_url(), None);
    }

    #[test]
    fn page_without_results_is_empty() {
        let page: MoviePage = serde_json::from_str(r#"{"page": 1}"#).unwrap();

        assert!(page.results.is_empty());
    }

    #[test]
    fn short_release_date_has_no_year() {
        let movie: Movie =
            serde_json::from_str(r#"{"id": 1, "title": "T", "release_date": ""}"#).unwrap();

        assert_eq!(movie.year(), None);
    }
}
