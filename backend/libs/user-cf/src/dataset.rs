//! Bootstrap data for the stores.
//!
//! Accepted JSON shape:
//!
//! ```json
//! {
//!   "items": [{"id": "P001", "name": "Laptop"}],
//!   "users": [
//!     {"id": "U1", "preferences": ["P001", "P002"]},
//!     {"id": "U2", "preferences": {"P001": 1.0}}
//!   ]
//! }
//! ```
//!
//! A preference list marks every item as liked; a map carries explicit ratings.

use crate::catalog::Catalog;
use crate::error::Result;
use crate::models::{Item, User};
use crate::user_store::UserStore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use tracing::{info, warn};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub users: Vec<UserRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(alias = "user_id")]
    pub id: String,
    #[serde(default, alias = "likes", alias = "ratings")]
    pub preferences: PreferenceEntries,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreferenceEntries {
    List(Vec<String>),
    Map(HashMap<String, f64>),
}

impl Default for PreferenceEntries {
    fn default() -> Self {
        PreferenceEntries::List(Vec::new())
    }
}

impl UserRecord {
    /// Convert to a [`User`], skipping non-positive or non-finite ratings.
    fn into_user(self) -> User {
        let mut user = User::new(self.id);
        match self.preferences {
            PreferenceEntries::List(item_ids) => {
                user = user.liking(item_ids);
            }
            PreferenceEntries::Map(ratings) => {
                for (item_id, rating) in ratings {
                    if !rating.is_finite() || rating <= 0.0 {
                        warn!(
                            user_id = %user.id,
                            item_id = %item_id,
                            rating,
                            "Skipping invalid rating in dataset"
                        );
                        continue;
                    }
                    user.preferences.insert(item_id, rating);
                }
            }
        }
        user
    }
}

impl Dataset {
    pub fn from_json_str(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: &str) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Eight products and five users with plain likes.
    pub fn reference() -> Self {
        let items = [
            ("P001", "Laptop"),
            ("P002", "Wireless Mouse"),
            ("P003", "Mechanical Keyboard"),
            ("P004", "27-inch Monitor"),
            ("P005", "USB-C Hub"),
            ("P006", "Noise-Cancelling Headphones"),
            ("P007", "Laptop Stand"),
            ("P008", "Webcam"),
        ]
        .into_iter()
        .map(|(id, name)| Item::new(id, name))
        .collect();

        let users = [
            ("U1", &["P001", "P002", "P003", "P007"][..]),
            ("U2", &["P001", "P004", "P005", "P008"][..]),
            ("U3", &["P001", "P002", "P006", "P007"][..]),
            ("U4", &["P004", "P005", "P003"][..]),
            ("U5", &["P001", "P007"][..]),
        ]
        .into_iter()
        .map(|(id, likes)| UserRecord {
            id: id.to_string(),
            preferences: PreferenceEntries::List(likes.iter().map(|s| s.to_string()).collect()),
        })
        .collect();

        Self { items, users }
    }

    pub fn into_stores(self) -> (Catalog, UserStore) {
        let catalog: Catalog = self.items.into_iter().collect();
        let users: UserStore = self.users.into_iter().map(UserRecord::into_user).collect();

        let stats = users.stats();
        info!(
            items = catalog.len(),
            users = stats.user_count,
            preferences = stats.preference_count,
            "Dataset loaded into stores"
        );

        (catalog, users)
    }
}
