use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use user_cf::{Dataset, Recommender, RecommenderConfig};

fn main() -> Result<()> {
    let config = RecommenderConfig::from_env().context("Failed to load config")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let dataset = match config.dataset_path.as_deref() {
        Some(path) => Dataset::from_path(path)
            .with_context(|| format!("Failed to load dataset from {}", path))?,
        None => {
            info!("RECOMMEND_DATASET_PATH not set, using reference dataset");
            Dataset::reference()
        }
    };
    let (catalog, users) = dataset.into_stores();

    let recommender = Recommender::with_config(&catalog, &users, config.clone());
    let outcome = recommender.recommend(&config.target_user);

    if let Some(signal) = outcome.signal() {
        warn!(user_id = %config.target_user, signal = %signal, "Recommendation degraded");
    }

    println!(
        "Recommendations for {} (k={}, n={}):",
        config.target_user, config.num_similar_users, config.num_recommendations
    );
    if outcome.is_empty() {
        println!("  (none)");
    }
    for (rank, item) in outcome.results.iter().enumerate() {
        println!("  {}. {} [{}]", rank + 1, item.name, item.id);
    }

    Ok(())
}
