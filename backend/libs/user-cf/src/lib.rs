//! User-based collaborative filtering
//!
//! Recommends catalog items to a user from what the users most similar to
//! them already hold:
//! - Similarity is the count of item ids two users share
//! - The top-k neighbors are ranked by similarity, ties by user id
//! - Candidates are counted once per neighbor, ranked by count, ties by item id
//! - Items the target already holds are never returned
//!
//! # Example
//!
//! ```
//! use user_cf::{Dataset, Recommender};
//!
//! let (catalog, users) = Dataset::reference().into_stores();
//! let recommender = Recommender::new(&catalog, &users);
//!
//! let outcome = recommender.get_recommendations("U5", 3, 2);
//! let ids: Vec<&str> = outcome.results.iter().map(|item| item.id.as_str()).collect();
//! assert_eq!(ids, vec!["P002", "P003"]);
//! ```

mod catalog;
mod error;
mod models;
mod recommender;
mod similarity;
mod user_store;

pub mod config;
pub mod dataset;

pub use catalog::Catalog;
pub use config::RecommenderConfig;
pub use dataset::Dataset;
pub use error::{RecommendError, Result};
pub use models::{Item, Outcome, ScoredCandidate, SimilarUser, User, LIKED};
pub use recommender::Recommender;
pub use similarity::SimilarityScorer;
pub use user_store::{StoreStats, UserStore};
