// High-level media browsing flows
//
// Composes the TMDB client and the artwork selector into the three
// operations a chat front end needs: search for a selection prompt, build a
// card for a picked title, and grab a logo for inline results. Everything
// returned here is plain data; presentation belongs to the caller.

use crate::config::AppConfig;
use crate::models::{MediaDetails, MediaKind, MediaSummary};
use crate::services::artwork::{select_artwork, ArtworkSet, SelectorOptions};
use crate::services::tmdb::TmdbClient;

/// Details plus selected artwork for one picked title.
#[derive(Debug, Clone)]
pub struct MediaCard {
    pub details: MediaDetails,
    pub artwork: ArtworkSet,
}

pub struct MediaService {
    tmdb: TmdbClient,
    options: SelectorOptions,
}

impl MediaService {
    pub fn new(tmdb: TmdbClient, options: SelectorOptions) -> Self {
        Self { tmdb, options }
    }

    /// Build a service from loaded configuration
    pub fn from_config(config: &AppConfig) -> Self {
        let options = SelectorOptions {
            primary_language: config.artwork.primary_language.clone(),
            extra_languages: config.artwork.extra_languages.clone(),
            ..Default::default()
        };
        Self::new(TmdbClient::new(config.tmdb.clone()), options)
    }

    /// Search, truncated for a selection prompt. A failed request is
    /// indistinguishable from a zero-hit search.
    pub async fn search_titles(&self, query: &str, limit: usize) -> Vec<MediaSummary> {
        let mut results = self.tmdb.search(query).await;
        results.truncate(limit);
        results
    }

    /// Everything needed to present one picked title: details plus
    /// classified artwork. `None` when details could not be fetched; artwork
    /// degrades to the empty shape on its own.
    pub async fn media_card(&self, id: i64, kind: MediaKind) -> Option<MediaCard> {
        let details = self.tmdb.details(id, kind).await?;
        let artwork = self.artwork(id, kind).await;
        Some(MediaCard { details, artwork })
    }

    /// Classified artwork buckets for one title. Always the configured
    /// shape, all-empty when the upstream fetch failed.
    pub async fn artwork(&self, id: i64, kind: MediaKind) -> ArtworkSet {
        let images = self.tmdb.images(id, kind).await;
        select_artwork(&images, self.tmdb.image_base(), &self.options)
    }

    /// First selected logo as a full URL, if any.
    pub async fn logo_url(&self, id: i64, kind: MediaKind) -> Option<String> {
        self.artwork(id, kind).await.logos.into_iter().next()
    }
}
