use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use super::icons::IconAtlas;
use crate::game::config::ViewerSettings;
use crate::game::fluids::{FluidId, FluidStack};
use crate::game::items::{ItemId, ItemStack};
use crate::viewer::error::{RenderError, TooltipError};
use crate::viewer::ingredient::{IngredientHelper, IngredientRenderer, ModIdHelper, Translator, VisibilityOracle};
use crate::viewer::surface::{GraphicsGuard, SlotRect, Surface, TooltipLine, OPAQUE_WHITE};

/// Drawn size of an ingredient inside a slot.
pub const INGREDIENT_SIZE: i32 = 16;

const COUNT_FONT_SIZE: f32 = 9.0;
const TOOLTIP_FONT_SIZE: f32 = 13.0;

pub struct ItemStackRenderer {
    icons: Rc<IconAtlas>,
    mod_ids: Rc<dyn ModIdHelper>,
    translator: Rc<dyn Translator>,
}

impl ItemStackRenderer {
    pub fn new(icons: Rc<IconAtlas>, mod_ids: Rc<dyn ModIdHelper>, translator: Rc<dyn Translator>) -> Self {
        Self { icons, mod_ids, translator }
    }
}

impl IngredientRenderer<ItemStack> for ItemStackRenderer {
    fn render(&self, surface: &mut dyn Surface, x: i32, y: i32, value: Option<&ItemStack>) -> Result<(), RenderError> {
        let Some(stack) = value else {
            return Ok(());
        };
        let texture = self
            .icons
            .item(stack.item)
            .ok_or_else(|| RenderError::fault(format!("no icon for {}", stack.item.display_name())))?;
        draw_icon(surface, texture, x, y);
        if stack.count > 1 {
            draw_count(surface, x, y, &stack.count.to_string());
        }
        Ok(())
    }

    fn font_for(&self, _value: &ItemStack) -> egui::FontId {
        egui::FontId::proportional(TOOLTIP_FONT_SIZE)
    }

    fn tooltip_lines(&self, value: &ItemStack) -> Result<Vec<TooltipLine>, TooltipError> {
        let item = value.item;
        let tier = item.tier().to_string();
        Ok(vec![
            TooltipLine::title(item.display_name()),
            TooltipLine::normal(
                self.translator
                    .translate("viewer.tooltip.tier", &[&tier, item.category().display_name()]),
            ),
            TooltipLine::mod_name(self.mod_ids.mod_name(item.namespace())),
        ])
    }
}

pub struct FluidRenderer {
    icons: Rc<IconAtlas>,
    mod_ids: Rc<dyn ModIdHelper>,
    translator: Rc<dyn Translator>,
}

impl FluidRenderer {
    pub fn new(icons: Rc<IconAtlas>, mod_ids: Rc<dyn ModIdHelper>, translator: Rc<dyn Translator>) -> Self {
        Self { icons, mod_ids, translator }
    }
}

impl IngredientRenderer<FluidStack> for FluidRenderer {
    fn render(&self, surface: &mut dyn Surface, x: i32, y: i32, value: Option<&FluidStack>) -> Result<(), RenderError> {
        let Some(stack) = value else {
            return Ok(());
        };
        let texture = self
            .icons
            .fluid(stack.fluid)
            .ok_or_else(|| RenderError::fault(format!("no icon for {}", stack.fluid.display_name())))?;
        draw_icon(surface, texture, x, y);
        Ok(())
    }

    fn font_for(&self, _value: &FluidStack) -> egui::FontId {
        egui::FontId::proportional(TOOLTIP_FONT_SIZE)
    }

    fn tooltip_lines(&self, value: &FluidStack) -> Result<Vec<TooltipLine>, TooltipError> {
        let amount = value.amount.to_string();
        Ok(vec![
            TooltipLine::title(value.fluid.display_name()),
            TooltipLine::normal(self.translator.translate("viewer.tooltip.amount", &[&amount])),
            TooltipLine::mod_name(self.mod_ids.mod_name(value.fluid.namespace())),
        ])
    }
}

fn draw_icon(surface: &mut dyn Surface, texture: egui::TextureId, x: i32, y: i32) {
    let mut gfx = GraphicsGuard::new(surface);
    gfx.set_color(OPAQUE_WHITE);
    gfx.blit(texture, SlotRect::new(x, y, INGREDIENT_SIZE, INGREDIENT_SIZE));
}

/// Stack size in the bottom-right corner, over the icon.
fn draw_count(surface: &mut dyn Surface, x: i32, y: i32, count: &str) {
    let font = egui::FontId::monospace(COUNT_FONT_SIZE);
    let width = (count.len() as f32 * COUNT_FONT_SIZE * 0.6).ceil() as i32;
    let mut gfx = GraphicsGuard::new(surface);
    gfx.disable_lighting();
    gfx.disable_depth_test();
    gfx.text(
        x + INGREDIENT_SIZE - width,
        y + INGREDIENT_SIZE - COUNT_FONT_SIZE as i32,
        count,
        &font,
        OPAQUE_WHITE,
    );
}

/// Items match on identity; the stack size is ignored.
pub struct ItemStackHelper;

impl IngredientHelper<ItemStack> for ItemStackHelper {
    fn match_focus(&self, candidates: &[Option<ItemStack>], value: &ItemStack) -> Option<ItemStack> {
        candidates
            .iter()
            .flatten()
            .find(|stack| stack.item == value.item)
            .copied()
    }
}

pub struct FluidHelper;

impl IngredientHelper<FluidStack> for FluidHelper {
    fn match_focus(&self, candidates: &[Option<FluidStack>], value: &FluidStack) -> Option<FluidStack> {
        candidates
            .iter()
            .flatten()
            .find(|stack| stack.fluid == value.fluid)
            .copied()
    }
}

/// The ingredient blacklist from the viewer config.
#[derive(Default)]
pub struct HiddenIngredients {
    items: HashSet<ItemId>,
    fluids: HashSet<FluidId>,
}

impl HiddenIngredients {
    pub fn from_settings(settings: &ViewerSettings) -> Self {
        Self {
            items: settings.hidden_items.iter().copied().collect(),
            fluids: settings.hidden_fluids.iter().copied().collect(),
        }
    }
}

impl VisibilityOracle<ItemStack> for HiddenIngredients {
    fn is_visible(&self, ingredient: &ItemStack) -> bool {
        !self.items.contains(&ingredient.item)
    }
}

impl VisibilityOracle<FluidStack> for HiddenIngredients {
    fn is_visible(&self, ingredient: &FluidStack) -> bool {
        !self.fluids.contains(&ingredient.fluid)
    }
}

/// Display names of the content namespaces.
pub struct ModIds {
    names: HashMap<&'static str, &'static str>,
}

impl ModIds {
    pub fn builtin() -> Self {
        let names = HashMap::from([("octofact", "Octofact"), ("octofact_debug", "Octofact Debug")]);
        Self { names }
    }
}

impl ModIdHelper for ModIds {
    fn mod_name(&self, namespace: &str) -> String {
        self.names
            .get(namespace)
            .map(|name| name.to_string())
            .unwrap_or_else(|| namespace.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::lang::Lang;
    use crate::viewer::surface::testing::{Op, RecordingSurface};
    use crate::viewer::surface::GraphicsState;

    fn atlas() -> Rc<IconAtlas> {
        Rc::new(IconAtlas::generate(&egui::Context::default()))
    }

    fn item_renderer(icons: Rc<IconAtlas>) -> ItemStackRenderer {
        ItemStackRenderer::new(icons, Rc::new(ModIds::builtin()), Rc::new(Lang::english()))
    }

    #[test]
    fn test_item_renderer_blits_icon_and_count() {
        let renderer = item_renderer(atlas());
        let mut surface = RecordingSurface::default();
        renderer
            .render(&mut surface, 10, 20, Some(&ItemStack::new(ItemId::Cube, 4)))
            .expect("render");

        assert!(matches!(surface.ops[0].0, Op::Blit(rect) if rect == SlotRect::new(10, 20, 16, 16)));
        assert!(surface.ops.iter().any(|(op, _)| matches!(op, Op::Text(_, _, text) if text == "4")));
        assert_eq!(surface.state, GraphicsState::RESTORED);
    }

    #[test]
    fn test_single_item_has_no_count() {
        let renderer = item_renderer(atlas());
        let mut surface = RecordingSurface::default();
        renderer
            .render(&mut surface, 0, 0, Some(&ItemStack::new(ItemId::Cube, 1)))
            .expect("render");
        assert_eq!(surface.ops.len(), 1);
    }

    #[test]
    fn test_blank_renders_nothing() {
        let renderer = item_renderer(atlas());
        let mut surface = RecordingSurface::default();
        renderer.render(&mut surface, 0, 0, None).expect("render");
        assert!(surface.ops.is_empty());
    }

    #[test]
    fn test_item_tooltip_lines() {
        let renderer = item_renderer(atlas());
        let lines = renderer
            .tooltip_lines(&ItemStack::new(ItemId::SourceMachine, 1))
            .expect("lines");
        assert_eq!(lines[0], TooltipLine::title("Source"));
        assert_eq!(lines.last(), Some(&TooltipLine::mod_name("Octofact Debug")));
    }

    #[test]
    fn test_fluid_tooltip_shows_amount() {
        let renderer = FluidRenderer::new(atlas(), Rc::new(ModIds::builtin()), Rc::new(Lang::english()));
        let lines = renderer
            .tooltip_lines(&FluidStack::new(FluidId::Flux, 500))
            .expect("lines");
        assert_eq!(lines[1], TooltipLine::normal("500 units"));
    }

    #[test]
    fn test_helpers_match_on_identity() {
        let candidates = vec![None, Some(ItemStack::new(ItemId::Cube, 3)), Some(ItemStack::new(ItemId::Square, 1))];
        let found = ItemStackHelper.match_focus(&candidates, &ItemStack::new(ItemId::Square, 64));
        assert_eq!(found, Some(ItemStack::new(ItemId::Square, 1)));
        assert_eq!(ItemStackHelper.match_focus(&candidates, &ItemStack::new(ItemId::Point, 1)), None);

        let fluids = vec![Some(FluidStack::new(FluidId::Potential, 100))];
        assert!(FluidHelper.match_focus(&fluids, &FluidStack::new(FluidId::Potential, 1)).is_some());
    }

    #[test]
    fn test_hidden_ingredients_from_settings() {
        let hidden = HiddenIngredients::from_settings(&ViewerSettings {
            hidden_fluids: vec![FluidId::Resonance],
            ..ViewerSettings::default()
        });
        assert!(!hidden.is_visible(&ItemStack::new(ItemId::SourceMachine, 1)));
        assert!(hidden.is_visible(&ItemStack::new(ItemId::Cube, 1)));
        assert!(!hidden.is_visible(&FluidStack::new(FluidId::Resonance, 1)));
        assert!(hidden.is_visible(&FluidStack::new(FluidId::Flux, 1)));
    }

    #[test]
    fn test_unknown_namespace_falls_back() {
        assert_eq!(ModIds::builtin().mod_name("octofact"), "Octofact");
        assert_eq!(ModIds::builtin().mod_name("elsewhere"), "elsewhere");
    }
}
