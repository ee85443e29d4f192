//! GraphQL type definitions
//!
//! These mirror the upstream TMDB response shapes one-to-one; resolvers
//! deserialize upstream JSON straight into them, so the contract stays a
//! projection of what upstream returns.
//!
//! Ratings (`vote_average`, `vote_count`) travel as strings: that is the
//! existing client contract, preserved here via a deserializer that
//! stringifies upstream numbers.

use async_graphql::{ComplexObject, Enum, SimpleObject};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Movie / TV / person discriminator carried on mixed result lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Tv,
    Person,
}

impl MediaKind {
    /// Upstream path segment for this kind
    pub fn as_path(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
            MediaKind::Person => "person",
        }
    }
}

/// Trending time window; defaults to a week when omitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Day,
    Week,
}

impl TimeWindow {
    pub fn as_path(&self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
        }
    }
}

/// Deserialize an upstream number (or string) into the contract's
/// numeric-as-string representation
fn num_as_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s,
        _ => "0".to_string(),
    })
}

fn zero_string() -> String {
    "0".to_string()
}

/// One row of a listing (popular/top-rated/search/trending/known-for)
#[derive(Debug, Clone, SimpleObject, Serialize, Deserialize)]
#[graphql(complex)]
#[serde(default)]
pub struct MediaSummary {
    /// Upstream identifier; unique per kind+id pair, not globally
    pub id: i64,
    /// Movie display name
    pub title: Option<String>,
    /// TV show display name
    pub name: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub genre_ids: Vec<i64>,
    pub media_type: Option<MediaKind>,
    pub popularity: f64,
    #[serde(deserialize_with = "num_as_string", default = "zero_string")]
    pub vote_average: String,
    #[serde(deserialize_with = "num_as_string", default = "zero_string")]
    pub vote_count: String,
}

#[ComplexObject]
impl MediaSummary {
    /// Whichever of `title` (movies) or `name` (TV) is set
    async fn display_title(&self) -> Option<String> {
        self.title.clone().or_else(|| self.name.clone())
    }
}

impl Default for MediaSummary {
    fn default() -> Self {
        Self {
            id: 0,
            title: None,
            name: None,
            overview: None,
            poster_path: None,
            backdrop_path: None,
            release_date: None,
            first_air_date: None,
            genre_ids: Vec::new(),
            media_type: None,
            popularity: 0.0,
            vote_average: zero_string(),
            vote_count: zero_string(),
        }
    }
}

#[derive(Debug, Clone, SimpleObject, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Full movie record from the details endpoint
#[derive(Debug, Clone, Default, SimpleObject, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieDetail {
    pub id: i64,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub genres: Vec<Genre>,
    pub runtime: Option<i32>,
    pub budget: Option<i64>,
    pub revenue: Option<i64>,
    pub imdb_id: Option<String>,
    pub status: Option<String>,
    pub homepage: Option<String>,
    pub popularity: f64,
    #[serde(deserialize_with = "num_as_string", default = "zero_string")]
    pub vote_average: String,
    #[serde(deserialize_with = "num_as_string", default = "zero_string")]
    pub vote_count: String,
}

/// Full TV show record from the details endpoint
#[derive(Debug, Clone, Default, SimpleObject, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowDetail {
    pub id: i64,
    pub name: Option<String>,
    pub original_name: Option<String>,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub first_air_date: Option<String>,
    pub last_air_date: Option<String>,
    pub genres: Vec<Genre>,
    pub number_of_seasons: Option<i32>,
    pub number_of_episodes: Option<i32>,
    pub status: Option<String>,
    pub homepage: Option<String>,
    pub seasons: Vec<Season>,
    pub last_episode_to_air: Option<Episode>,
    pub next_episode_to_air: Option<Episode>,
    pub popularity: f64,
    #[serde(deserialize_with = "num_as_string", default = "zero_string")]
    pub vote_average: String,
    #[serde(deserialize_with = "num_as_string", default = "zero_string")]
    pub vote_count: String,
}

#[derive(Debug, Clone, Default, SimpleObject, Serialize, Deserialize)]
#[serde(default)]
pub struct Season {
    pub id: i64,
    pub season_number: i32,
    pub name: Option<String>,
    pub overview: Option<String>,
    pub air_date: Option<String>,
    pub episode_count: Option<i32>,
    pub poster_path: Option<String>,
    /// Populated by the season-details query only
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone, Default, SimpleObject, Serialize, Deserialize)]
#[serde(default)]
pub struct Episode {
    pub id: i64,
    pub season_number: i32,
    pub episode_number: i32,
    pub name: Option<String>,
    pub overview: Option<String>,
    pub air_date: Option<String>,
    pub runtime: Option<i32>,
    pub still_path: Option<String>,
    #[serde(deserialize_with = "num_as_string", default = "zero_string")]
    pub vote_average: String,
    pub crew: Vec<CrewCredit>,
    pub guest_stars: Vec<CastCredit>,
}

/// Person record from the details endpoint; `known_for` only appears on
/// search/popular listings
#[derive(Debug, Clone, Default, SimpleObject, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
    pub id: i64,
    pub name: Option<String>,
    pub biography: Option<String>,
    pub birthday: Option<String>,
    pub deathday: Option<String>,
    pub place_of_birth: Option<String>,
    pub profile_path: Option<String>,
    pub known_for_department: Option<String>,
    pub popularity: f64,
    pub known_for: Vec<MediaSummary>,
}

#[derive(Debug, Clone, Default, SimpleObject, Serialize, Deserialize)]
#[serde(default)]
pub struct CastCredit {
    pub id: i64,
    pub name: Option<String>,
    pub character: Option<String>,
    pub profile_path: Option<String>,
    pub order: Option<i32>,
}

#[derive(Debug, Clone, Default, SimpleObject, Serialize, Deserialize)]
#[serde(default)]
pub struct CrewCredit {
    pub id: i64,
    pub name: Option<String>,
    pub job: Option<String>,
    pub department: Option<String>,
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Default, SimpleObject, Serialize, Deserialize)]
#[serde(default)]
pub struct Credits {
    pub id: i64,
    pub cast: Vec<CastCredit>,
    pub crew: Vec<CrewCredit>,
}

/// A media entry in a person's filmography, with the role attached
#[derive(Debug, Clone, Default, SimpleObject, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonCredit {
    pub id: i64,
    pub title: Option<String>,
    pub name: Option<String>,
    pub character: Option<String>,
    pub job: Option<String>,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub media_type: Option<MediaKind>,
    #[serde(deserialize_with = "num_as_string", default = "zero_string")]
    pub vote_average: String,
}

#[derive(Debug, Clone, Default, SimpleObject, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonCredits {
    pub cast: Vec<PersonCredit>,
    pub crew: Vec<PersonCredit>,
}

#[derive(Debug, Clone, Default, SimpleObject, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewAuthor {
    pub name: Option<String>,
    pub username: Option<String>,
    pub avatar_path: Option<String>,
    #[serde(deserialize_with = "opt_num_as_string")]
    pub rating: Option<String>,
}

/// Deserialize an optional upstream number into an optional string
fn opt_num_as_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s),
        _ => None,
    }))
}

#[derive(Debug, Clone, Default, SimpleObject, Serialize, Deserialize)]
#[serde(default)]
pub struct Review {
    pub id: String,
    pub author: Option<String>,
    pub content: Option<String>,
    pub created_at: Option<String>,
    pub author_details: Option<ReviewAuthor>,
}

#[derive(Debug, Clone, Default, SimpleObject, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageInfo {
    pub file_path: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub aspect_ratio: Option<f64>,
    #[serde(deserialize_with = "num_as_string", default = "zero_string")]
    pub vote_average: String,
}

#[derive(Debug, Clone, Default, SimpleObject, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSet {
    pub id: i64,
    pub posters: Vec<ImageInfo>,
    pub backdrops: Vec<ImageInfo>,
    pub profiles: Vec<ImageInfo>,
}

#[derive(Debug, Clone, Default, SimpleObject, Serialize, Deserialize)]
#[serde(default)]
pub struct Video {
    pub id: String,
    pub key: Option<String>,
    pub site: Option<String>,
    pub name: Option<String>,
    /// Upstream `type` field: Trailer, Teaser, Clip, Featurette, ...
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub official: Option<bool>,
    pub published_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ratings_deserialize_as_strings() {
        let summary: MediaSummary = serde_json::from_value(json!({
            "id": 5,
            "title": "X",
            "vote_average": 7.8,
            "vote_count": 1500
        }))
        .unwrap();
        assert_eq!(summary.vote_average, "7.8");
        assert_eq!(summary.vote_count, "1500");
    }

    #[test]
    fn missing_ratings_default_to_zero_string() {
        let summary: MediaSummary = serde_json::from_value(json!({"id": 5})).unwrap();
        assert_eq!(summary.vote_average, "0");
        assert_eq!(summary.vote_count, "0");
    }

    #[test]
    fn media_kind_round_trips_lowercase() {
        let summary: MediaSummary =
            serde_json::from_value(json!({"id": 1, "media_type": "tv"})).unwrap();
        assert_eq!(summary.media_type, Some(MediaKind::Tv));
        assert_eq!(MediaKind::Tv.as_path(), "tv");
    }

    #[test]
    fn review_author_rating_is_optional_string() {
        let review: Review = serde_json::from_value(json!({
            "id": "r1",
            "author": "a",
            "content": "good",
            "author_details": {"username": "a", "rating": 9}
        }))
        .unwrap();
        assert_eq!(review.author_details.unwrap().rating.as_deref(), Some("9"));
    }

    #[test]
    fn video_kind_maps_upstream_type() {
        let video: Video =
            serde_json::from_value(json!({"id": "v", "type": "Trailer", "key": "abc"})).unwrap();
        assert_eq!(video.kind.as_deref(), Some("Trailer"));
    }
}
