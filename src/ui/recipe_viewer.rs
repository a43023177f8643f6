use std::rc::Rc;

use super::icons::IconAtlas;
use super::ingredients::{FluidHelper, FluidRenderer, HiddenIngredients, ItemStackHelper, ItemStackRenderer, ModIds};
use super::painter::{EguiSurface, SlotFrame};
use crate::game::config::{ViewerConfig, ViewerSettings};
use crate::game::fluids::FluidStack;
use crate::game::inventory::Inventory;
use crate::game::items::{ItemId, ItemStack};
use crate::game::lang::Lang;
use crate::game::recipes::{candidate_items, RecipeIndex};
use crate::game::tags::TagRegistry;
use crate::viewer::cycle::{Clock, SystemClock, CYCLE_PERIOD_MS};
use crate::viewer::group::{SlotGroup, DEFAULT_SLOT_SIZE};
use crate::viewer::ingredient::{Collaborators, Focus, FocusMode, SlotRole, TagResolver, Translator, VisibilityOracle};
use crate::viewer::slot::Slot;
use crate::viewer::surface::TooltipLine;

pub const SLOT_SIZE: i32 = DEFAULT_SLOT_SIZE;
const ARROW_GAP: i32 = 24;
const FLUID_ROW_GAP: i32 = 4;
const BROWSER_ICON: f32 = 24.0;

/// Overdrawn on input slots the inventory cannot fill.
pub const MISSING_INPUT: u32 = 0x66FF_0000;

/// Mouse position used when the pointer is outside a layout.
const NO_MOUSE: i32 = i32::MIN;

/// Everything recipe layouts are built from.
pub struct ViewerServices {
    pub tags: Rc<TagRegistry>,
    pub recipes: RecipeIndex,
    pub inventory: Rc<Inventory>,
    pub items: Collaborators<ItemStack>,
    pub fluids: Collaborators<FluidStack>,
}

impl ViewerServices {
    pub fn new(settings: &ViewerSettings, icons: Rc<IconAtlas>, inventory: Inventory, clock: Rc<dyn Clock>) -> Self {
        let tags = Rc::new(TagRegistry::builtin());
        let recipes = RecipeIndex::new(&tags);
        let translator: Rc<dyn Translator> = Rc::new(Lang::english());
        let mod_ids = Rc::new(ModIds::builtin());
        let hidden = Rc::new(HiddenIngredients::from_settings(settings));
        let tag_resolver = settings
            .show_tag_equivalents
            .then(|| Rc::clone(&tags) as Rc<dyn TagResolver>);

        let items = Collaborators {
            renderer: Rc::new(ItemStackRenderer::new(
                Rc::clone(&icons),
                mod_ids.clone(),
                Rc::clone(&translator),
            )),
            helper: Rc::new(ItemStackHelper),
            visibility: hidden.clone(),
            tags: tag_resolver,
            translator: Rc::clone(&translator),
            clock: Rc::clone(&clock),
        };
        let fluids = Collaborators {
            renderer: Rc::new(FluidRenderer::new(icons, mod_ids, Rc::clone(&translator))),
            helper: Rc::new(FluidHelper),
            visibility: hidden,
            tags: None,
            translator,
            clock,
        };

        Self { tags, recipes, inventory: Rc::new(inventory), items, fluids }
    }
}

/// The slots of one recipe: item inputs, then the output, with fluids on a
/// second row.
pub struct RecipeLayout {
    pub recipe: usize,
    pub items: SlotGroup<ItemStack>,
    pub fluids: SlotGroup<FluidStack>,
    pub craftable: bool,
    output_slot: usize,
    width: i32,
    height: i32,
}

/// What the pointer did to a layout this frame.
pub struct LayoutResponse {
    pub response: egui::Response,
    pub hovered_slot: Option<usize>,
    pub hovered_item: Option<ItemStack>,
}

impl RecipeLayout {
    pub fn new(recipe_index: usize, services: &ViewerServices, focus: Option<&Focus<ItemStack>>) -> Self {
        let recipe = &services.recipes.all[recipe_index];
        // Neighbouring recipes flip their slots a third of a period apart
        let cycle_offset = recipe_index as i64 * CYCLE_PERIOD_MS / 3;

        let mut items = SlotGroup::new(services.items.clone(), cycle_offset);
        items.set_focus(focus.cloned());
        let inventory = Rc::clone(&services.inventory);
        let translator = Rc::clone(&services.items.translator);
        items.set_tooltip_callback(move |_, role, stack: &ItemStack, lines| {
            if role == SlotRole::Input {
                let held = inventory.count(stack.item).to_string();
                lines.push(TooltipLine::secondary(translator.translate("viewer.tooltip.held", &[&held])));
            }
            Ok(())
        });

        let mut candidates = Vec::with_capacity(recipe.inputs.len() + 1);
        for (i, input) in recipe.inputs.iter().enumerate() {
            items.init_default(i, SlotRole::Input, i as i32 * SLOT_SIZE, 0);
            let stacks = candidate_items(input, &services.tags)
                .into_iter()
                .map(|item| Some(ItemStack::new(item, input.count())))
                .collect();
            candidates.push((i, stacks));
            if !services.inventory.satisfies(input, &services.tags) {
                items.set_highlight(i, Some(MISSING_INPUT));
            }
        }
        let output_slot = recipe.inputs.len();
        let output_x = output_slot as i32 * SLOT_SIZE + ARROW_GAP;
        items.init_default(output_slot, SlotRole::Output, output_x, 0);
        candidates.push((output_slot, vec![Some(ItemStack::new(recipe.output, recipe.output_count))]));
        for i in 0..=output_slot {
            items.set_background(i, Box::new(SlotFrame { size: SLOT_SIZE }));
        }
        items.set_all(candidates);

        let fluid_y = SLOT_SIZE + FLUID_ROW_GAP;
        let mut fluids = SlotGroup::new(services.fluids.clone(), cycle_offset);
        for (i, &(fluid, amount)) in recipe.fluid_inputs.iter().enumerate() {
            fluids.init_default(i, SlotRole::Input, i as i32 * SLOT_SIZE, fluid_y);
            fluids.set_background(i, Box::new(SlotFrame { size: SLOT_SIZE }));
            fluids.set(i, Some(vec![Some(FluidStack::new(fluid, amount))]));
        }

        let height = if recipe.fluid_inputs.is_empty() { SLOT_SIZE } else { fluid_y + SLOT_SIZE };
        Self {
            recipe: recipe_index,
            items,
            fluids,
            craftable: services.recipes.can_craft(recipe, &services.inventory, &services.tags),
            output_slot,
            width: output_x + SLOT_SIZE,
            height,
        }
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn show(&self, ui: &mut egui::Ui) -> LayoutResponse {
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(self.width as f32, self.height as f32),
            egui::Sense::click(),
        );
        let (sx, sy) = (rect.min.x.round() as i32, rect.min.y.round() as i32);
        let (mx, my) = response
            .hover_pos()
            .map(|pos| ((pos.x - rect.min.x).floor() as i32, (pos.y - rect.min.y).floor() as i32))
            .unwrap_or((NO_MOUSE, NO_MOUSE));

        let arrow_x = self.output_slot as i32 * SLOT_SIZE + ARROW_GAP / 2;
        ui.painter().text(
            egui::pos2((sx + arrow_x) as f32, (sy + SLOT_SIZE / 2) as f32),
            egui::Align2::CENTER_CENTER,
            "\u{2192}",
            egui::FontId::proportional(14.0),
            egui::Color32::from_rgb(200, 200, 220),
        );

        let mut surface = EguiSurface::new(ui);
        if let Err(e) = self.items.draw(&mut surface, sx, sy, mx, my) {
            log::error!("Recipe {} items failed to draw: {e}", self.recipe);
        }
        if let Err(e) = self.fluids.draw(&mut surface, sx, sy, mx, my) {
            log::error!("Recipe {} fluids failed to draw: {e}", self.recipe);
        }

        let hovered_slot = self.items.get_hovered(mx, my);
        let hovered_item = hovered_slot
            .and_then(|i| self.items.slot(i))
            .and_then(Slot::displayed_ingredient);
        LayoutResponse { response, hovered_slot, hovered_item }
    }
}

/// The lookup window: an ingredient browser, and the recipes matching the
/// current focus a page at a time.
pub struct RecipeViewer {
    pub open: bool,
    services: ViewerServices,
    icons: Rc<IconAtlas>,
    recipes_per_page: usize,
    log_hover: bool,
    focus: Option<Focus<ItemStack>>,
    matches: Vec<usize>,
    page: usize,
    layouts: Vec<RecipeLayout>,
    last_hover: Option<(usize, usize)>,
}

impl RecipeViewer {
    pub fn new(config: &ViewerConfig, icons: Rc<IconAtlas>, inventory: Inventory) -> Self {
        let services = ViewerServices::new(&config.viewer, Rc::clone(&icons), inventory, Rc::new(SystemClock::new()));
        Self::with_services(services, icons, config)
    }

    pub fn with_services(services: ViewerServices, icons: Rc<IconAtlas>, config: &ViewerConfig) -> Self {
        Self {
            open: true,
            services,
            icons,
            recipes_per_page: config.viewer.recipes_per_page.max(1),
            log_hover: config.debug.log_hover,
            focus: None,
            matches: Vec::new(),
            page: 0,
            layouts: Vec::new(),
            last_hover: None,
        }
    }

    /// Show the recipes an OUTPUT focus is made by, or an INPUT focus is used in.
    pub fn lookup(&mut self, focus: Focus<ItemStack>) {
        self.matches = self.services.recipes.recipes_with_focus(&focus);
        log::debug!(
            "{:?} lookup for {}: {} recipes",
            focus.mode,
            focus.value.item.display_name(),
            self.matches.len()
        );
        self.focus = Some(focus);
        self.page = 0;
        self.rebuild();
    }

    pub fn close_lookup(&mut self) {
        self.focus = None;
        self.matches.clear();
        self.layouts.clear();
        self.page = 0;
    }

    pub fn focus(&self) -> Option<&Focus<ItemStack>> {
        self.focus.as_ref()
    }

    pub fn layouts(&self) -> &[RecipeLayout] {
        &self.layouts
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.matches.len().div_ceil(self.recipes_per_page).max(1)
    }

    pub fn next_page(&mut self) {
        self.page = (self.page + 1) % self.page_count();
        self.rebuild();
    }

    pub fn prev_page(&mut self) {
        let count = self.page_count();
        self.page = (self.page + count - 1) % count;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.layouts = self
            .matches
            .iter()
            .skip(self.page * self.recipes_per_page)
            .take(self.recipes_per_page)
            .map(|&recipe| RecipeLayout::new(recipe, &self.services, self.focus.as_ref()))
            .collect();
    }

    fn translate(&self, key: &str, args: &[&str]) -> String {
        self.services.items.translator.translate(key, args)
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        if !self.open {
            return;
        }

        let mut lookup = None;
        self.browser_window(ctx, &mut lookup);

        let title = self.focus.as_ref().map(|focus| {
            let key = match focus.mode {
                FocusMode::Output => "viewer.title.recipes",
                FocusMode::Input => "viewer.title.uses",
            };
            self.translate(key, &[focus.value.item.display_name()])
        });
        if let Some(title) = title {
            let mut window_open = true;
            let mut page_step = 0;
            let mut hover = None;
            let page_label = self.translate(
                "viewer.page",
                &[&(self.page + 1).to_string(), &self.page_count().to_string()],
            );

            egui::Window::new(title)
                .id(egui::Id::new("recipe_layouts"))
                .open(&mut window_open)
                .collapsible(true)
                .resizable(false)
                .default_width(220.0)
                .show(ctx, |ui| {
                    if self.layouts.is_empty() {
                        ui.label(self.translate("viewer.empty", &[]));
                    }
                    for layout in &self.layouts {
                        let recipe = &self.services.recipes.all[layout.recipe];
                        ui.horizontal(|ui| {
                            ui.strong(recipe.machine.display_name());
                            let (key, color) = if layout.craftable {
                                ("viewer.recipe.craftable", egui::Color32::from_rgb(100, 200, 100))
                            } else {
                                ("viewer.recipe.missing", egui::Color32::from_rgb(200, 100, 100))
                            };
                            ui.colored_label(color, self.translate(key, &[]));
                        });

                        let shown = layout.show(ui);
                        if let Some(slot) = shown.hovered_slot {
                            hover = Some((layout.recipe, slot));
                        }
                        if let Some(stack) = shown.hovered_item {
                            if shown.response.clicked() {
                                lookup = Some(Focus::new(FocusMode::Output, stack));
                            } else if shown.response.secondary_clicked() {
                                lookup = Some(Focus::new(FocusMode::Input, stack));
                            }
                        }
                        ui.separator();
                    }
                    ui.horizontal(|ui| {
                        if ui.button("<").clicked() {
                            page_step = -1;
                        }
                        ui.label(page_label);
                        if ui.button(">").clicked() {
                            page_step = 1;
                        }
                    });
                });

            if self.log_hover && hover != self.last_hover {
                if let Some((recipe, slot)) = hover {
                    log::debug!("Hovering slot {slot} of recipe {recipe}");
                }
                self.last_hover = hover;
            }
            match page_step {
                1 => self.next_page(),
                -1 => self.prev_page(),
                _ => {}
            }
            if !window_open {
                self.close_lookup();
            }
        }

        if let Some(focus) = lookup {
            self.lookup(focus);
        }
    }

    fn browser_hint(&self, item: ItemId) -> String {
        let made = self.services.recipes.recipes_for(item).len().to_string();
        let used = self.services.recipes.recipes_using(item).len().to_string();
        let mut hint = format!(
            "{}\n{}",
            item.display_name(),
            self.translate("viewer.browser.counts", &[&made, &used])
        );
        for tag in self.services.tags.tags_containing(item) {
            hint.push('\n');
            hint.push_str(tag);
        }
        hint
    }

    /// Left click shows how an item is made, right click what it is used in.
    fn browser_window(&self, ctx: &egui::Context, lookup: &mut Option<Focus<ItemStack>>) {
        egui::Window::new(self.translate("viewer.browser", &[]))
            .id(egui::Id::new("ingredient_browser"))
            .collapsible(true)
            .resizable(true)
            .default_width(260.0)
            .default_height(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        for &item in ItemId::all() {
                            let stack = ItemStack::new(item, 1);
                            if !self.services.items.visibility.is_visible(&stack) {
                                continue;
                            }
                            let Some(texture) = self.icons.item(item) else {
                                continue;
                            };
                            let response = ui
                                .add(egui::Button::image(egui::load::SizedTexture::new(
                                    texture,
                                    egui::vec2(BROWSER_ICON, BROWSER_ICON),
                                )))
                                .on_hover_text(self.browser_hint(item));
                            if response.clicked() {
                                *lookup = Some(Focus::new(FocusMode::Output, stack));
                            } else if response.secondary_clicked() {
                                *lookup = Some(Focus::new(FocusMode::Input, stack));
                            }
                        }
                    });
                });
            });
    }
}
