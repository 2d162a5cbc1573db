// Services module - business logic layer

pub mod artwork;
pub mod media;
pub mod tmdb;
