use std::collections::HashMap;
use super::items::{ItemId, RecipeInput};
use super::recipes::candidate_items;
use super::tags::TagRegistry;

#[derive(Clone, Debug)]
pub struct Inventory {
    items: HashMap<ItemId, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
        }
    }

    /// A small stock so some recipes show as craftable and some as missing inputs.
    pub fn starting_inventory() -> Self {
        let mut inv = Self::new();
        inv.add(ItemId::Point, 8);
        inv.add(ItemId::LineSegment, 4);
        inv.add(ItemId::Square, 6);
        inv.add(ItemId::Preimage, 3);
        inv.add(ItemId::Quadrupole, 1);
        inv
    }

    pub fn add(&mut self, item: ItemId, count: u32) {
        *self.items.entry(item).or_insert(0) += count;
    }

    pub fn count(&self, item: ItemId) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    /// True if a single candidate of `input` is held in the required count.
    pub fn satisfies(&self, input: &RecipeInput, tags: &TagRegistry) -> bool {
        candidate_items(input, tags)
            .into_iter()
            .any(|item| self.count(item) >= input.count())
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_add_accumulates() {
        let mut inv = Inventory::new();
        inv.add(ItemId::Point, 10);
        inv.add(ItemId::Point, 5);
        assert_eq!(inv.count(ItemId::Point), 15);
        assert_eq!(inv.count(ItemId::Cube), 0);
    }

    #[test]
    fn test_starting_inventory_contents() {
        let inv = Inventory::starting_inventory();
        assert_eq!(inv.count(ItemId::Point), 8);
        assert_eq!(inv.count(ItemId::Quadrupole), 1);
        assert_eq!(inv.count(ItemId::Cube), 0);
    }

    #[test]
    fn test_satisfies_tag_input() {
        let tags = TagRegistry::builtin();
        let mut inv = Inventory::new();
        inv.add(ItemId::Image, 1);
        inv.add(ItemId::Function, 1);
        // Two of one member are needed, one each of two members is not enough
        assert!(!inv.satisfies(&RecipeInput::Tag("octofact:morphisms", 2), &tags));
        inv.add(ItemId::Image, 1);
        assert!(inv.satisfies(&RecipeInput::Tag("octofact:morphisms", 2), &tags));
        assert!(!inv.satisfies(&RecipeInput::Item(ItemId::Point, 1), &tags));
    }
}
