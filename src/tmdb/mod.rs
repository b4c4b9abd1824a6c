//! TMDB API client
//!
//! Contains the [`SearchClient`] seam the coordinator talks to and the
//! TMDB implementation of it.

mod envelope;
mod movie_search;
mod traits;

pub use envelope::{decode_page, lenient_string, ErrorBody, Page};
pub use movie_search::{MovieRecord, MovieSearch, ACCEPTABLE_STATUS};
pub use traits::SearchClient;
