use std::collections::HashMap;

use crate::viewer::ingredient::Translator;

/// A key -> template table. Templates take positional `{0}`, `{1}`, ... arguments.
pub struct Lang {
    entries: HashMap<&'static str, &'static str>,
}

impl Lang {
    pub fn english() -> Self {
        let entries = HashMap::from([
            ("viewer.tooltip.recipe.tag", "Accepts any of {0}"),
            ("viewer.tooltip.amount", "{0} units"),
            ("viewer.tooltip.tier", "Tier {0} | {1}"),
            ("viewer.tooltip.held", "{0} in inventory"),
            ("viewer.recipe.craftable", "Craftable"),
            ("viewer.recipe.missing", "Missing inputs"),
            ("viewer.browser", "Ingredients"),
            ("viewer.browser.counts", "{0} recipes | {1} uses"),
            ("viewer.empty", "No recipes"),
            ("viewer.title.recipes", "Recipes for {0}"),
            ("viewer.title.uses", "Uses of {0}"),
            ("viewer.page", "Page {0} / {1}"),
        ]);
        Self { entries }
    }
}

impl Translator for Lang {
    /// Unknown keys come back unchanged so missing entries stay visible.
    fn translate(&self, key: &str, args: &[&str]) -> String {
        let Some(template) = self.entries.get(key) else {
            return key.to_string();
        };
        args.iter()
            .enumerate()
            .fold(template.to_string(), |text, (i, arg)| text.replace(&format!("{{{i}}}"), arg))
    }
}
