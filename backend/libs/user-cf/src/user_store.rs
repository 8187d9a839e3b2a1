use crate::error::{RecommendError, Result};
use crate::models::User;
use std::collections::HashMap;
use tracing::debug;

/// Users keyed by id. Re-adding an id replaces the previous user.
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    users: HashMap<String, User>,
}

/// Snapshot counters for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreStats {
    pub user_count: usize,
    pub preference_count: usize,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&mut self, user: User) {
        if let Some(previous) = self.users.insert(user.id.clone(), user) {
            debug!(user_id = %previous.id, "User overwritten");
        }
    }

    pub fn get_user(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    /// Set or overwrite one preference of an existing user.
    ///
    /// Unknown users are reported as `UserNotFound`; they are never created
    /// implicitly. Ratings must be positive and finite.
    pub fn add_preference(&mut self, user_id: &str, item_id: &str, rating: f64) -> Result<()> {
        if !rating.is_finite() || rating <= 0.0 {
            return Err(RecommendError::InvalidRating {
                user_id: user_id.to_string(),
                item_id: item_id.to_string(),
                rating,
            });
        }

        let user = self
            .users
            .get_mut(user_id)
            .ok_or_else(|| RecommendError::UserNotFound(user_id.to_string()))?;

        user.preferences.insert(item_id.to_string(), rating);
        debug!(user_id = %user_id, item_id = %item_id, rating, "Preference recorded");
        Ok(())
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            user_count: self.users.len(),
            preference_count: self.users.values().map(User::preference_count).sum(),
        }
    }
}

impl FromIterator<User> for UserStore {
    fn from_iter<I: IntoIterator<Item = User>>(iter: I) -> Self {
        let mut store = UserStore::new();
        for user in iter {
            store.add_user(user);
        }
        store
    }
}
