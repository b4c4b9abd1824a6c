//! Search coordination module
//!
//! Owns the movie search state, drives the search client and keeps the
//! suggestion list current.

mod coordinator;
mod models;

pub use coordinator::SearchCoordinator;
pub use models::*;
