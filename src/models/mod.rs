// Domain types and TMDB wire types
//
// Wire types are validated and converted at the API boundary; the rest of the
// crate only sees `MediaKind`/`MediaSummary`/`MediaDetails` and the image
// records.

use serde::Deserialize;

/// Movie vs. series - determines which upstream endpoint family is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Movie,
    Series,
}

impl MediaKind {
    /// The path segment TMDB uses for this kind (`/movie/...` vs `/tv/...`).
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "tv",
        }
    }

    /// Parse the `media_type` field of a multi-search result.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "movie" => Some(MediaKind::Movie),
            "tv" => Some(MediaKind::Series),
            _ => None,
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One candidate title from a multi-search, enough to build a selection prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaSummary {
    pub id: i64,
    pub kind: MediaKind,
    pub title: String,
    pub release_year: Option<i32>,
}

/// Details fetched after the user picks a title. No persistent lifecycle -
/// fetched, used, and discarded per request.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaDetails {
    pub title: String,
    pub synopsis: Option<String>,
    pub release_year: Option<i32>,
}

/// One artwork entry from a TMDB images response.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageRecord {
    pub file_path: String,
    /// ISO 639-1 language tag; absent means language-neutral.
    pub iso_639_1: Option<String>,
    #[serde(default)]
    pub aspect_ratio: f64,
    #[serde(default)]
    pub vote_average: f64,
}

/// Raw `/{kind}/{id}/images` response. All arrays default to empty so a
/// partial response still deserializes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImagesResponse {
    #[serde(default)]
    pub backdrops: Vec<ImageRecord>,
    #[serde(default)]
    pub posters: Vec<ImageRecord>,
    #[serde(default)]
    pub logos: Vec<ImageRecord>,
}

/// Raw `/search/multi` response.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchEntry>,
}

/// One raw multi-search entry. Movies carry `title`/`release_date`, series
/// carry `name`/`first_air_date`; person entries are dropped at conversion.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchEntry {
    pub id: i64,
    pub media_type: Option<String>,
    pub title: Option<String>,
    pub name: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
}

impl SearchEntry {
    pub(crate) fn into_summary(self) -> Option<MediaSummary> {
        let kind = MediaKind::parse(self.media_type.as_deref()?)?;
        let title = self.title.or(self.name)?;
        let release_year = parse_year(self.release_date.or(self.first_air_date).as_deref());
        Some(MediaSummary {
            id: self.id,
            kind,
            title,
            release_year,
        })
    }
}

/// Raw per-kind details response, shared between `/movie/{id}` and `/tv/{id}`.
#[derive(Debug, Deserialize)]
pub(crate) struct DetailsResponse {
    pub title: Option<String>,
    pub name: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
}

impl DetailsResponse {
    pub(crate) fn into_details(self) -> MediaDetails {
        let release_year = parse_year(self.release_date.or(self.first_air_date).as_deref());
        MediaDetails {
            title: self.title.or(self.name).unwrap_or_default(),
            synopsis: self.overview.filter(|o| !o.is_empty()),
            release_year,
        }
    }
}

/// Extract a four-digit year from a date string like `"2023-04-15"`.
pub(crate) fn parse_year(date: Option<&str>) -> Option<i32> {
    date.and_then(|d| d.split('-').next())
        .and_then(|y| y.parse().ok())
}
