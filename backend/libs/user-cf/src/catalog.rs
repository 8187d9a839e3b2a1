use crate::models::Item;
use std::collections::HashMap;
use tracing::debug;

/// Items keyed by id. Re-adding an id replaces the previous item.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: HashMap<String, Item>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, item: Item) {
        if let Some(previous) = self.items.insert(item.id.clone(), item) {
            debug!(item_id = %previous.id, "Catalog item overwritten");
        }
    }

    pub fn get_item(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }
}

impl FromIterator<Item> for Catalog {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for item in iter {
            catalog.add_item(item);
        }
        catalog
    }
}
