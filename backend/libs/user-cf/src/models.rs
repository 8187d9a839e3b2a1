use crate::error::RecommendError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Rating stored for a plain like/purchase event.
pub const LIKED: f64 = 1.0;

/// Catalog entry. Identity is the `id` alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A user and the items they engaged with: item_id → rating.
///
/// Only the presence of a key is read by the scorer; the rating value is kept
/// for callers that care about it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub preferences: HashMap<String, f64>,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            preferences: HashMap::new(),
        }
    }

    /// Builder that marks every given item as liked.
    pub fn liking<I, S>(mut self, item_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for item_id in item_ids {
            self.preferences.insert(item_id.into(), LIKED);
        }
        self
    }

    pub fn with_preference(mut self, item_id: impl Into<String>, rating: f64) -> Self {
        self.preferences.insert(item_id.into(), rating);
        self
    }

    pub fn has_preference(&self, item_id: &str) -> bool {
        self.preferences.contains_key(item_id)
    }

    pub fn item_ids(&self) -> impl Iterator<Item = &str> {
        self.preferences.keys().map(String::as_str)
    }

    pub fn preference_count(&self) -> usize {
        self.preferences.len()
    }
}

/// Neighbor selected for a target user, with its shared-item count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarUser<'a> {
    pub user: &'a User,
    pub similarity: usize,
}

/// Item held by at least one neighbor but not by the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCandidate {
    pub item_id: String,
    /// Number of selected neighbors holding the item.
    pub score: usize,
}

/// Result sequence plus an optional non-fatal diagnostic.
///
/// Lookups never fail the caller: a missing target or an empty neighborhood
/// yields an empty `results` with `signal` set.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub results: Vec<T>,
    pub signal: Option<RecommendError>,
}

impl<T> Outcome<T> {
    pub fn ok(results: Vec<T>) -> Self {
        Self {
            results,
            signal: None,
        }
    }

    pub fn empty(signal: RecommendError) -> Self {
        Self {
            results: Vec::new(),
            signal: Some(signal),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn signal(&self) -> Option<&RecommendError> {
        self.signal.as_ref()
    }

    pub fn into_results(self) -> Vec<T> {
        self.results
    }
}
