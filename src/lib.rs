// Platform-neutral core of a TMDB poster bot: search for movies/TV shows,
// fetch details, and select artwork by language and aspect ratio. The chat
// platform (command routing, keyboards, message delivery) lives outside this
// crate and only ever sees plain data structures.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::{AppConfig, TmdbConfig};
pub use error::{Error, Result};
pub use models::{ImageRecord, ImagesResponse, MediaDetails, MediaKind, MediaSummary};
pub use services::artwork::{
    select_artwork, ArtworkSet, ImageSize, LanguageArtwork, Orientation, SelectorOptions,
};
pub use services::media::{MediaCard, MediaService};
pub use services::tmdb::TmdbClient;
