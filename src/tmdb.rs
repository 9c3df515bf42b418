//! Client for The Movie Database (TMDB) API.

pub mod client;
pub mod error;
pub mod model;

pub use client::TmdbClient;
pub use error::TmdbError;
pub use model::{Movie, MoviePage};
