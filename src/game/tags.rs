use std::collections::{HashMap, HashSet};

use super::items::ItemId;
use crate::viewer::ingredient::TagResolver;

/// Named sets of items. Recipes may accept any member of a tag.
pub struct TagRegistry {
    tags: Vec<(&'static str, HashSet<ItemId>)>,
    by_item: HashMap<ItemId, Vec<usize>>,
}

impl TagRegistry {
    pub fn new(tags: Vec<(&'static str, Vec<ItemId>)>) -> Self {
        let tags: Vec<(&'static str, HashSet<ItemId>)> = tags
            .into_iter()
            .map(|(id, members)| (id, members.into_iter().collect()))
            .collect();
        let mut by_item: HashMap<ItemId, Vec<usize>> = HashMap::new();
        for (i, (_, members)) in tags.iter().enumerate() {
            for &item in members {
                by_item.entry(item).or_default().push(i);
            }
        }
        Self { tags, by_item }
    }

    pub fn builtin() -> Self {
        use ItemId::*;
        Self::new(vec![
            ("octofact:primitives", vec![Point, LineSegment]),
            ("octofact:polytopes", vec![Square, Cube, NeckerCube]),
            ("octofact:waves", vec![Wavelet, StandingWave]),
            ("octofact:morphisms", vec![Function, Image, Preimage]),
            ("octofact:machines", vec![Composer, Inverter, Embedder, Quotient, Transformer]),
        ])
    }

    /// Members of a tag in registry order, or `None` for an unknown tag.
    pub fn members(&self, tag: &str) -> Option<Vec<ItemId>> {
        let (_, members) = self.tags.iter().find(|(id, _)| *id == tag)?;
        Some(
            ItemId::all()
                .iter()
                .copied()
                .filter(|item| members.contains(item))
                .collect(),
        )
    }

    pub fn tags_containing(&self, item: ItemId) -> Vec<&'static str> {
        self.by_item
            .get(&item)
            .map(|indices| indices.iter().map(|&i| self.tags[i].0).collect())
            .unwrap_or_default()
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TagResolver for TagRegistry {
    fn tag_of_exact_set(&self, items: &HashSet<ItemId>) -> Option<String> {
        self.tags
            .iter()
            .find(|(_, members)| members == items)
            .map(|(id, _)| id.to_string())
    }
}
