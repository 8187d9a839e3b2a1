use crate::error::RecommendError;
use crate::models::{Outcome, SimilarUser, User};
use crate::user_store::UserStore;
use tracing::{debug, info};

/// Neighbor selection over a borrowed [`UserStore`].
///
/// Similarity is the number of item ids two users both hold. Ratings are
/// ignored.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityScorer<'a> {
    users: &'a UserStore,
}

impl<'a> SimilarityScorer<'a> {
    pub fn new(users: &'a UserStore) -> Self {
        Self { users }
    }

    /// Size of the intersection of both users' preference key sets.
    pub fn similarity(user_a: &User, user_b: &User) -> usize {
        let (small, large) = if user_a.preference_count() <= user_b.preference_count() {
            (user_a, user_b)
        } else {
            (user_b, user_a)
        };

        small
            .item_ids()
            .filter(|item_id| large.has_preference(item_id))
            .count()
    }

    /// Top-`k` users sharing at least one item with the target.
    ///
    /// Ordered by similarity descending, then user id ascending. The target
    /// itself is never scored.
    pub fn find_top_similar_users(&self, target_id: &str, k: usize) -> Outcome<SimilarUser<'a>> {
        let Some(target) = self.users.get_user(target_id) else {
            info!(user_id = %target_id, "Target user not found for similarity ranking");
            return Outcome::empty(RecommendError::TargetNotFound(target_id.to_string()));
        };

        let mut ranked: Vec<SimilarUser<'a>> = self
            .users
            .users()
            .filter(|other| other.id != target.id)
            .map(|other| SimilarUser {
                user: other,
                similarity: Self::similarity(target, other),
            })
            .filter(|neighbor| neighbor.similarity > 0)
            .collect();

        if ranked.is_empty() {
            info!(user_id = %target_id, "No users share an item with target");
            return Outcome::empty(RecommendError::NoSimilarUsers(target_id.to_string()));
        }

        ranked.sort_by(|a, b| {
            b.similarity
                .cmp(&a.similarity)
                .then_with(|| a.user.id.cmp(&b.user.id))
        });
        ranked.truncate(k);

        debug!(
            user_id = %target_id,
            k,
            selected = ranked.len(),
            "Similar users selected"
        );

        Outcome::ok(ranked)
    }
}
