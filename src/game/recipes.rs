use std::collections::HashMap;

use super::inventory::Inventory;
use super::items::{all_recipes, ItemId, ItemStack, Recipe, RecipeInput};
use super::tags::TagRegistry;
use crate::viewer::ingredient::{Focus, FocusMode};

pub struct RecipeIndex {
    pub all: Vec<Recipe>,
    by_output: HashMap<ItemId, Vec<usize>>,
    by_input: HashMap<ItemId, Vec<usize>>,
}

impl RecipeIndex {
    pub fn new(tags: &TagRegistry) -> Self {
        Self::from_recipes(all_recipes(), tags)
    }

    pub fn from_recipes(all: Vec<Recipe>, tags: &TagRegistry) -> Self {
        let mut by_output: HashMap<ItemId, Vec<usize>> = HashMap::new();
        let mut by_input: HashMap<ItemId, Vec<usize>> = HashMap::new();

        for (i, recipe) in all.iter().enumerate() {
            by_output.entry(recipe.output).or_default().push(i);
            for input in &recipe.inputs {
                for item in candidate_items(input, tags) {
                    let uses = by_input.entry(item).or_default();
                    if uses.last() != Some(&i) {
                        uses.push(i);
                    }
                }
            }
        }

        Self { all, by_output, by_input }
    }

    pub fn recipes_for(&self, output: ItemId) -> Vec<&Recipe> {
        self.lookup(&self.by_output, &output)
    }

    /// Recipes consuming `item`, directly or through a tag it belongs to.
    pub fn recipes_using(&self, item: ItemId) -> Vec<&Recipe> {
        self.lookup(&self.by_input, &item)
    }

    /// Indices of the recipes a focus asks for: an OUTPUT focus shows how the
    /// item is made, an INPUT focus shows what it is used in.
    pub fn recipes_with_focus(&self, focus: &Focus<ItemStack>) -> Vec<usize> {
        let map = match focus.mode {
            FocusMode::Output => &self.by_output,
            FocusMode::Input => &self.by_input,
        };
        map.get(&focus.value.item).cloned().unwrap_or_default()
    }

    pub fn can_craft(&self, recipe: &Recipe, inventory: &Inventory, tags: &TagRegistry) -> bool {
        recipe
            .inputs
            .iter()
            .all(|input| inventory.satisfies(input, tags))
    }

    fn lookup(&self, map: &HashMap<ItemId, Vec<usize>>, key: &ItemId) -> Vec<&Recipe> {
        map.get(key)
            .map(|indices| indices.iter().map(|&i| &self.all[i]).collect())
            .unwrap_or_default()
    }
}

/// Every item that can fill a recipe input, in registry order.
pub fn candidate_items(input: &RecipeInput, tags: &TagRegistry) -> Vec<ItemId> {
    match *input {
        RecipeInput::Item(item, _) => vec![item],
        RecipeInput::Tag(tag, _) => tags.members(tag).unwrap_or_else(|| {
            log::warn!("Recipe input references unknown tag {tag}");
            Vec::new()
        }),
    }
}
