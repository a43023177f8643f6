use std::collections::HashSet;

use super::error::TooltipError;
use super::ingredient::{
    Collaborators, Ingredient, IngredientKind, IngredientRenderer, SlotRole, TagResolver, Translator,
};
use super::surface::{GraphicsGuard, SlotRect, Surface, TooltipLine, OPAQUE_WHITE};

/// Translucent white drawn over the hovered slot.
pub const HOVER_WASH: u32 = 0x7FFF_FFFF;

/// Localisation key for the "accepts any of <tag>" line.
pub const TAG_LINE_KEY: &str = "viewer.tooltip.recipe.tag";

/// Hook letting the owner of a group add lines to a slot's tooltip.
pub type TooltipCallback<T> =
    dyn Fn(usize, SlotRole, &T, &mut Vec<TooltipLine>) -> Result<(), TooltipError>;

/// Builds and draws the tooltip of one slot.
pub struct TooltipComposer<'a, T> {
    pub slot_index: usize,
    pub role: SlotRole,
    /// Slot rect minus padding, relative to the surface origin.
    pub inner: SlotRect,
    pub full_list: &'a [Option<T>],
    pub callback: Option<&'a TooltipCallback<T>>,
    pub collaborators: &'a Collaborators<T>,
}

impl<T: Ingredient> TooltipComposer<'_, T> {
    pub fn compose(
        &self,
        surface: &mut dyn Surface,
        value: &T,
        surface_x: i32,
        surface_y: i32,
        mouse_x: i32,
        mouse_y: i32,
    ) -> Result<(), TooltipError> {
        let mut gfx = GraphicsGuard::new(surface);
        gfx.disable_lighting();
        gfx.disable_depth_test();
        gfx.fill_rect(self.inner.offset(surface_x, surface_y), HOVER_WASH);
        gfx.set_color(OPAQUE_WHITE);

        let renderer = self.collaborators.renderer.as_ref();
        let mut lines = safe_tooltip_lines(renderer, value);
        if let Some(callback) = self.callback {
            callback(self.slot_index, self.role, value, &mut lines)?;
        }
        if let Some(line) = tag_equivalence_line(
            self.full_list,
            self.collaborators.tags.as_deref(),
            self.collaborators.translator.as_ref(),
        ) {
            lines.push(line);
        }

        let font = renderer.font_for(value);
        gfx.tooltip(surface_x + mouse_x, surface_y + mouse_y, &lines, &font);
        Ok(())
    }
}

/// Base tooltip lines, or no lines if the renderer could not produce them.
pub fn safe_tooltip_lines<T: Ingredient>(renderer: &dyn IngredientRenderer<T>, value: &T) -> Vec<TooltipLine> {
    match renderer.tooltip_lines(value) {
        Ok(lines) => lines,
        Err(e) => {
            log::error!("Tooltip lines failed for {value:?}: {e}");
            Vec::new()
        }
    }
}

/// "Accepts any of <tag>" when the distinct items of `full_list` are exactly
/// the members of some tag. Only item stacks have tags.
pub fn tag_equivalence_line<T: Ingredient>(
    full_list: &[Option<T>],
    tags: Option<&dyn TagResolver>,
    translator: &dyn Translator,
) -> Option<TooltipLine> {
    if T::KIND != IngredientKind::ItemStack {
        return None;
    }
    let tags = tags?;
    let items: HashSet<_> = full_list.iter().flatten().filter_map(Ingredient::item_id).collect();
    if items.len() < 2 {
        return None;
    }
    let tag = tags.tag_of_exact_set(&items)?;
    Some(TooltipLine::secondary(translator.translate(TAG_LINE_KEY, &[&tag])))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::fluids::{FluidId, FluidStack};
    use crate::game::items::{ItemId, ItemStack};
    use crate::game::lang::Lang;
    use crate::game::tags::TagRegistry;

    fn stacks(items: &[ItemId]) -> Vec<Option<ItemStack>> {
        items.iter().map(|&i| Some(ItemStack::new(i, 1))).collect()
    }

    #[test]
    fn test_tag_line_for_exact_member_set() {
        let tags = TagRegistry::builtin();
        let list = stacks(&[ItemId::Square, ItemId::Cube, ItemId::NeckerCube]);
        let line = tag_equivalence_line(&list, Some(&tags), &Lang::english()).expect("tag line");
        assert_eq!(line, TooltipLine::secondary("Accepts any of octofact:polytopes"));
    }

    #[test]
    fn test_tag_line_ignores_counts_blanks_and_duplicates() {
        let tags = TagRegistry::builtin();
        let list = vec![
            Some(ItemStack::new(ItemId::Wavelet, 4)),
            None,
            Some(ItemStack::new(ItemId::StandingWave, 1)),
            Some(ItemStack::new(ItemId::Wavelet, 1)),
        ];
        assert!(tag_equivalence_line(&list, Some(&tags), &Lang::english()).is_some());
    }

    #[test]
    fn test_no_tag_line_for_missing_or_extra_member() {
        let tags = TagRegistry::builtin();
        let lang = Lang::english();
        let missing = stacks(&[ItemId::Square, ItemId::Cube]);
        assert_eq!(tag_equivalence_line(&missing, Some(&tags), &lang), None);
        let extra = stacks(&[ItemId::Square, ItemId::Cube, ItemId::NeckerCube, ItemId::Belt]);
        assert_eq!(tag_equivalence_line(&extra, Some(&tags), &lang), None);
    }

    #[test]
    fn test_no_tag_line_for_single_item() {
        let tags = TagRegistry::new(vec![("solo", vec![ItemId::Cube])]);
        let list = stacks(&[ItemId::Cube, ItemId::Cube]);
        assert_eq!(tag_equivalence_line(&list, Some(&tags), &Lang::english()), None);
    }

    #[test]
    fn test_no_tag_line_without_resolver_or_for_fluids() {
        let lang = Lang::english();
        let list = stacks(&[ItemId::Wavelet, ItemId::StandingWave]);
        assert_eq!(tag_equivalence_line(&list, None, &lang), None);

        let tags = TagRegistry::builtin();
        let fluids = vec![
            Some(FluidStack::new(FluidId::Flux, 1)),
            Some(FluidStack::new(FluidId::Potential, 1)),
        ];
        assert_eq!(tag_equivalence_line(&fluids, Some(&tags), &lang), None);
    }
}
