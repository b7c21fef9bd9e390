use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(MovieId);
id_newtype!(GenreId);

/// Display metadata for a single movie as returned by the catalog service.
///
/// Values are never mutated after they are received; the catalog only
/// reorders, truncates or accumulates whole summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre_ids: Option<Vec<GenreId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adult: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<bool>,
}

impl MovieSummary {
    /// Minimal summary with only the required fields populated.
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            original_title: None,
            poster_path: None,
            backdrop_path: None,
            overview: None,
            release_date: String::new(),
            vote_average: None,
            vote_count: None,
            popularity: None,
            original_language: None,
            genre_ids: None,
            adult: None,
            video: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_sparse_remote_summary() {
        let raw = r#"{"id": 268, "title": "Batman", "poster_path": null, "genre_ids": [14, 28]}"#;
        let movie: MovieSummary = serde_json::from_str(raw).expect("decode");

        assert_eq!(movie.id, MovieId(268));
        assert_eq!(movie.title, "Batman");
        assert_eq!(movie.release_date, "");
        assert!(movie.poster_path.is_none());
        assert_eq!(movie.genre_ids, Some(vec![GenreId(14), GenreId(28)]));
    }

    #[test]
    fn ids_serialize_as_bare_numbers() {
        let encoded = serde_json::to_string(&MovieId(42)).expect("encode");
        assert_eq!(encoded, "42");
    }
}
