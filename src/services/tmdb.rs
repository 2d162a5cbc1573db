// TMDB API client
// API Documentation: https://developer.themoviedb.org/reference/intro/getting-started

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::TmdbConfig;
use crate::error::{Error, Result};
use crate::models::{
    DetailsResponse, ImagesResponse, MediaDetails, MediaKind, MediaSummary, SearchResponse,
};

/// TMDB API client.
///
/// Each call is an independent, idempotent read: no caching, no retries, no
/// shared state beyond the connection pool inside [`reqwest::Client`].
///
/// Every operation comes in two flavors. The `try_*` methods return a typed
/// [`Error`]; the plain methods apply the bot's failure semantics - any
/// upstream failure collapses to an empty-shaped result, indistinguishable
/// from a genuinely empty answer.
pub struct TmdbClient {
    client: Client,
    config: TmdbConfig,
}

impl TmdbClient {
    /// Create a new TMDB client from an injected configuration
    pub fn new(config: TmdbConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Base URL of the image host, for resolving artwork URLs
    pub fn image_base(&self) -> &str {
        &self.config.image_base
    }

    /// Search movies and TV shows with one multi-search request.
    /// Person results and anything else without a movie/tv media type are
    /// dropped at the boundary; order is TMDB's.
    pub async fn try_search(&self, query: &str) -> Result<Vec<MediaSummary>> {
        let url = format!(
            "{}/search/multi?api_key={}&query={}&language={}&include_adult=false",
            self.config.api_base,
            self.config.api_key,
            urlencoding::encode(query),
            self.config.language
        );

        let response: SearchResponse = self.get_json(&url, "/search/multi").await?;
        Ok(response
            .results
            .into_iter()
            .filter_map(|entry| entry.into_summary())
            .collect())
    }

    /// Search with empty-result fallback: a failed request looks exactly
    /// like a search with no hits.
    pub async fn search(&self, query: &str) -> Vec<MediaSummary> {
        match self.try_search(query).await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!("TMDB search for {:?} failed: {}", query, e);
                Vec::new()
            }
        }
    }

    /// Get title, synopsis and release year for one movie or series
    pub async fn try_details(&self, id: i64, kind: MediaKind) -> Result<MediaDetails> {
        let url = format!(
            "{}/{}/{}?api_key={}&language={}",
            self.config.api_base,
            kind.as_str(),
            id,
            self.config.api_key,
            self.config.language
        );

        let response: DetailsResponse = self.get_json(&url, "details").await?;
        Ok(response.into_details())
    }

    /// Details with fallback: `None` on any failure
    pub async fn details(&self, id: i64, kind: MediaKind) -> Option<MediaDetails> {
        match self.try_details(id, kind).await {
            Ok(details) => Some(details),
            Err(e) => {
                tracing::warn!("TMDB details for {} {} failed: {}", kind, id, e);
                None
            }
        }
    }

    /// Fetch the raw artwork arrays for one movie or series. No language
    /// filter is sent; classification happens locally in the selector.
    pub async fn try_images(&self, id: i64, kind: MediaKind) -> Result<ImagesResponse> {
        let url = format!(
            "{}/{}/{}/images?api_key={}",
            self.config.api_base,
            kind.as_str(),
            id,
            self.config.api_key
        );

        self.get_json(&url, "images").await
    }

    /// Images with fallback: the empty response shape on any failure, so the
    /// selector still produces the all-empty structure
    pub async fn images(&self, id: i64, kind: MediaKind) -> ImagesResponse {
        match self.try_images(id, kind).await {
            Ok(images) => images,
            Err(e) => {
                tracing::warn!("TMDB images for {} {} failed: {}", kind, id, e);
                ImagesResponse::default()
            }
        }
    }

    /// Issue one GET and decode the JSON body. `endpoint` is only for
    /// logging; the full URL carries the API key and stays out of the logs.
    async fn get_json<T: DeserializeOwned>(&self, url: &str, endpoint: &str) -> Result<T> {
        tracing::debug!("TMDB request: {}", endpoint);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
