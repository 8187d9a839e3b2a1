use crate::catalog::Catalog;
use crate::config::RecommenderConfig;
use crate::error::RecommendError;
use crate::models::{Item, Outcome, ScoredCandidate};
use crate::similarity::SimilarityScorer;
use crate::user_store::UserStore;
use std::collections::HashMap;
use tracing::{debug, info};

/// User-based collaborative filtering over borrowed stores.
///
/// Algorithm:
/// 1. Select the top-k users sharing items with the target
/// 2. Count, per item, how many of them hold it (target's items excluded)
/// 3. Rank by count descending, item id ascending
/// 4. Keep the first n and resolve them through the catalog
///
/// Each neighbor contributes exactly +1 per item, regardless of its
/// similarity or the stored rating.
pub struct Recommender<'a> {
    catalog: &'a Catalog,
    users: &'a UserStore,
    scorer: SimilarityScorer<'a>,
    config: RecommenderConfig,
}

impl<'a> Recommender<'a> {
    pub fn new(catalog: &'a Catalog, users: &'a UserStore) -> Self {
        Self::with_config(catalog, users, RecommenderConfig::default())
    }

    pub fn with_config(
        catalog: &'a Catalog,
        users: &'a UserStore,
        config: RecommenderConfig,
    ) -> Self {
        Self {
            catalog,
            users,
            scorer: SimilarityScorer::new(users),
            config,
        }
    }

    pub fn scorer(&self) -> &SimilarityScorer<'a> {
        &self.scorer
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Recommend with the configured `num_similar_users` and `num_recommendations`.
    pub fn recommend(&self, target_id: &str) -> Outcome<Item> {
        self.get_recommendations(
            target_id,
            self.config.num_similar_users,
            self.config.num_recommendations,
        )
    }

    /// Up to `num_recommendations` items the target does not hold yet, drawn
    /// from its `num_similar_users` nearest neighbors.
    ///
    /// Candidate ids unknown to the catalog are dropped, so the result may be
    /// shorter than `num_recommendations`.
    pub fn get_recommendations(
        &self,
        target_id: &str,
        num_similar_users: usize,
        num_recommendations: usize,
    ) -> Outcome<Item> {
        let ranked = self.rank_candidates(target_id, num_similar_users);
        if ranked.is_empty() {
            return Outcome {
                results: Vec::new(),
                signal: ranked.signal,
            };
        }

        let candidate_count = ranked.len();
        let mut items = Vec::with_capacity(num_recommendations.min(candidate_count));
        for candidate in ranked.results.into_iter().take(num_recommendations) {
            match self.catalog.get_item(&candidate.item_id) {
                Some(item) => items.push(item.clone()),
                None => {
                    debug!(
                        user_id = %target_id,
                        item_id = %candidate.item_id,
                        "Candidate missing from catalog, skipped"
                    );
                }
            }
        }

        info!(
            user_id = %target_id,
            num_similar_users,
            candidate_items = candidate_count,
            returned = items.len(),
            "User-based CF recommendations generated"
        );

        Outcome::ok(items)
    }

    /// Every candidate item with its neighbor count, fully ordered, before the
    /// `n` cut and catalog resolution.
    pub fn rank_candidates(
        &self,
        target_id: &str,
        num_similar_users: usize,
    ) -> Outcome<ScoredCandidate> {
        let Some(target) = self.users.get_user(target_id) else {
            info!(user_id = %target_id, "Target user not found, no recommendations");
            return Outcome::empty(RecommendError::TargetNotFound(target_id.to_string()));
        };

        let neighbors = self.scorer.find_top_similar_users(target_id, num_similar_users);
        if neighbors.is_empty() {
            debug!(user_id = %target_id, "No neighbors selected, no basis for recommendation");
            return Outcome {
                results: Vec::new(),
                signal: neighbors.signal,
            };
        }

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for neighbor in &neighbors.results {
            for item_id in neighbor.user.item_ids() {
                if target.has_preference(item_id) {
                    continue;
                }
                *counts.entry(item_id).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<ScoredCandidate> = counts
            .into_iter()
            .map(|(item_id, score)| ScoredCandidate {
                item_id: item_id.to_string(),
                score,
            })
            .collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.item_id.cmp(&b.item_id)));

        debug!(
            user_id = %target_id,
            neighbors = neighbors.len(),
            candidates = ranked.len(),
            "Candidates aggregated"
        );

        Outcome::ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn fixture() -> (Catalog, UserStore) {
        let catalog: Catalog = (1..=8)
            .map(|i| Item::new(format!("P00{}", i), format!("Product {}", i)))
            .collect();
        let users: UserStore = vec![
            User::new("U1").liking(["P001", "P002", "P003", "P007"]),
            User::new("U2").liking(["P001", "P004", "P005", "P008"]),
            User::new("U3").liking(["P001", "P002", "P006", "P007"]),
            User::new("U4").liking(["P004", "P005", "P003"]),
            User::new("U5").liking(["P001", "P007"]),
        ]
        .into_iter()
        .collect();
        (catalog, users)
    }

    fn item_ids(outcome: &Outcome<Item>) -> Vec<&str> {
        outcome.results.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_reference_scenario() {
        let (catalog, users) = fixture();
        let recommender = Recommender::new(&catalog, &users);

        let outcome = recommender.get_recommendations("U5", 3, 5);

        assert!(outcome.signal().is_none());
        // U3 also holds P006, which outranks P008 on id
        assert_eq!(item_ids(&outcome), vec!["P002", "P003", "P004", "P005", "P006"]);

        let outcome = recommender.get_recommendations("U5", 3, 6);
        assert_eq!(
            item_ids(&outcome),
            vec!["P002", "P003", "P004", "P005", "P006", "P008"]
        );
    }

    #[test]
    fn test_candidate_scores_are_unweighted_counts() {
        let (catalog, users) = fixture();
        let recommender = Recommender::new(&catalog, &users);

        let ranked = recommender.rank_candidates("U5", 3);
        let scored: Vec<(&str, usize)> = ranked
            .results
            .iter()
            .map(|c| (c.item_id.as_str(), c.score))
            .collect();

        assert_eq!(
            scored,
            vec![
                ("P002", 2),
                ("P003", 1),
                ("P004", 1),
                ("P005", 1),
                ("P006", 1),
                ("P008", 1)
            ]
        );
    }

    #[test]
    fn test_rating_values_do_not_weight_scores() {
        let catalog: Catalog = vec![Item::new("A", "a"), Item::new("B", "b")].into_iter().collect();
        let users: UserStore = vec![
            User::new("T").liking(["X"]),
            User::new("N1").liking(["X"]).with_preference("B", 100.0),
            User::new("N2").liking(["X", "A"]),
        ]
        .into_iter()
        .collect();
        let recommender = Recommender::new(&catalog, &users);

        // A and B tie at one neighbor each, so id order decides
        let outcome = recommender.get_recommendations("T", 2, 2);
        assert_eq!(item_ids(&outcome), vec!["A", "B"]);
    }

    #[test]
    fn test_truncates_to_n() {
        let (catalog, users) = fixture();
        let recommender = Recommender::new(&catalog, &users);

        assert_eq!(item_ids(&recommender.get_recommendations("U5", 3, 2)), vec!["P002", "P003"]);
        assert!(recommender.get_recommendations("U5", 3, 0).is_empty());
    }

    #[test]
    fn test_unknown_catalog_ids_are_dropped() {
        let (mut catalog, users) = fixture();
        catalog = catalog
            .items()
            .filter(|item| item.id != "P003")
            .cloned()
            .collect();
        let recommender = Recommender::new(&catalog, &users);

        let outcome = recommender.get_recommendations("U5", 3, 5);

        assert!(outcome.signal().is_none());
        // dropped after the n cut, so nothing backfills the gap
        assert_eq!(item_ids(&outcome), vec!["P002", "P004", "P005", "P006"]);
    }

    #[test]
    fn test_missing_target() {
        let (catalog, users) = fixture();
        let recommender = Recommender::new(&catalog, &users);

        let outcome = recommender.get_recommendations("nonexistent", 3, 5);

        assert!(outcome.is_empty());
        assert_eq!(
            outcome.signal(),
            Some(&RecommendError::TargetNotFound("nonexistent".into()))
        );
    }

    #[test]
    fn test_no_similar_users() {
        let (catalog, mut users) = fixture();
        users.add_user(User::new("U6").liking(["P999"]));
        let recommender = Recommender::new(&catalog, &users);

        let outcome = recommender.get_recommendations("U6", 3, 5);

        assert!(outcome.is_empty());
        assert_eq!(
            outcome.signal(),
            Some(&RecommendError::NoSimilarUsers("U6".into()))
        );
    }

    #[test]
    fn test_recommend_uses_config_defaults() {
        let (catalog, users) = fixture();
        let config = RecommenderConfig {
            num_similar_users: 1,
            num_recommendations: 10,
            ..RecommenderConfig::default()
        };
        let recommender = Recommender::with_config(&catalog, &users, config);

        // only U1 is consulted
        assert_eq!(item_ids(&recommender.recommend("U5")), vec!["P002", "P003"]);
    }
}
