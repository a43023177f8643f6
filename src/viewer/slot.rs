use std::rc::Rc;

use super::cycle::CycleTimer;
use super::error::RenderError;
use super::ingredient::{Collaborators, Focus, Ingredient, SlotRole, VisibilityOracle};
use super::surface::{Drawable, GraphicsGuard, SlotRect, Surface};
use super::tooltip::{TooltipCallback, TooltipComposer};

/// The visibility filter stops once it has kept more than this many ingredients.
pub const VISIBLE_CAP: usize = 100;

/// One rectangular cell of a recipe layout, cycling through its candidates.
pub struct Slot<T: Ingredient> {
    slot_index: usize,
    role: SlotRole,
    rect: SlotRect,
    padding: (i32, i32),
    /// What the slot cycles through. `None` entries are blank turns.
    display_list: Vec<Option<T>>,
    /// The last candidate list, verbatim.
    full_list: Vec<Option<T>>,
    background: Option<Box<dyn Drawable>>,
    tooltip_callback: Option<Rc<TooltipCallback<T>>>,
    cycle_timer: CycleTimer,
    collaborators: Collaborators<T>,
}

impl<T: Ingredient> Slot<T> {
    pub fn new(
        slot_index: usize,
        role: SlotRole,
        rect: SlotRect,
        padding: (i32, i32),
        cycle_offset: i64,
        collaborators: Collaborators<T>,
    ) -> Self {
        let cycle_timer = CycleTimer::new(cycle_offset, Rc::clone(&collaborators.clock));
        Self {
            slot_index,
            role,
            rect,
            padding,
            display_list: Vec::new(),
            full_list: Vec::new(),
            background: None,
            tooltip_callback: None,
            cycle_timer,
            collaborators,
        }
    }

    /// Replace the candidates. A focus on this slot's side of the recipe pins
    /// the slot to the matching candidate; otherwise hidden candidates are
    /// dropped, unless that would leave nothing.
    pub fn set(&mut self, candidates: Option<Vec<Option<T>>>, focus: Option<&Focus<T>>) {
        self.display_list.clear();
        self.full_list.clear();

        let source: &[Option<T>] = candidates.as_deref().unwrap_or_default();
        let matched = focus
            .filter(|focus| self.role.matches(focus.mode))
            .and_then(|focus| self.collaborators.helper.match_focus(source, &focus.value));

        self.display_list = match matched {
            Some(ingredient) => vec![Some(ingredient)],
            None => filter_visible(source, self.collaborators.visibility.as_ref()),
        };

        if let Some(candidates) = candidates {
            self.full_list = candidates;
        }
    }

    pub fn set_background(&mut self, background: Box<dyn Drawable>) {
        self.background = Some(background);
    }

    pub fn set_tooltip_callback(&mut self, callback: Option<Rc<TooltipCallback<T>>>) {
        self.tooltip_callback = callback;
    }

    pub fn slot_index(&self) -> usize {
        self.slot_index
    }

    pub fn role(&self) -> SlotRole {
        self.role
    }

    pub fn is_input(&self) -> bool {
        self.role == SlotRole::Input
    }

    pub fn rect(&self) -> SlotRect {
        self.rect
    }

    pub fn enabled(&self) -> bool {
        !self.display_list.is_empty()
    }

    pub fn display_list(&self) -> &[Option<T>] {
        &self.display_list
    }

    pub fn all_ingredients(&self) -> &[Option<T>] {
        &self.full_list
    }

    /// The candidate shown right now.
    pub fn displayed_ingredient(&self) -> Option<T> {
        self.displayed().cloned()
    }

    fn displayed(&self) -> Option<&T> {
        self.cycle_timer.pick(&self.display_list).and_then(Option::as_ref)
    }

    /// Rect minus padding, relative to the surface origin.
    fn inner_rect(&self) -> SlotRect {
        self.rect.inset(self.padding.0, self.padding.1)
    }

    pub fn is_mouse_over(&self, surface_x: i32, surface_y: i32, mouse_x: i32, mouse_y: i32) -> bool {
        self.enabled() && self.rect.offset(surface_x, surface_y).contains(mouse_x, mouse_y)
    }

    pub fn draw(&self, surface: &mut dyn Surface, surface_x: i32, surface_y: i32) -> Result<(), RenderError> {
        self.cycle_timer.on_draw();

        let mut gfx = GraphicsGuard::new(surface);
        let x = surface_x + self.rect.x;
        let y = surface_y + self.rect.y;
        if let Some(background) = &self.background {
            background.draw(&mut *gfx, x, y);
        }

        let value = self.displayed();
        let (px, py) = self.padding;
        self.collaborators
            .renderer
            .render(&mut *gfx, x + px, y + py, value)
            .map_err(|fault| match value {
                Some(ingredient) => RenderError::Ingredient {
                    ingredient: format!("{ingredient:?}"),
                    source: Box::new(fault),
                },
                None => fault,
            })
    }

    /// Fill the inner rect with `color`, enabled or not.
    pub fn draw_highlight(&self, surface: &mut dyn Surface, color: u32, surface_x: i32, surface_y: i32) {
        let mut gfx = GraphicsGuard::new(surface);
        gfx.disable_lighting();
        gfx.disable_depth_test();
        gfx.fill_rect(self.inner_rect().offset(surface_x, surface_y), color);
    }

    /// Hover wash and tooltip. The caller decides whether the slot is hovered.
    pub fn draw_overlays(&self, surface: &mut dyn Surface, surface_x: i32, surface_y: i32, mouse_x: i32, mouse_y: i32) {
        let Some(value) = self.displayed() else {
            return;
        };
        let composer = TooltipComposer {
            slot_index: self.slot_index,
            role: self.role,
            inner: self.inner_rect(),
            full_list: &self.full_list,
            callback: self.tooltip_callback.as_deref(),
            collaborators: &self.collaborators,
        };
        if let Err(e) = composer.compose(surface, value, surface_x, surface_y, mouse_x, mouse_y) {
            log::error!("Tooltip failed on slot {} showing {value:?}: {e}", self.slot_index);
        }
    }
}

/// Keep blanks and visible ingredients. Stops early once more than
/// `VISIBLE_CAP` are kept; falls back to `source` when nothing is kept.
pub fn filter_visible<T: Clone>(source: &[Option<T>], oracle: &dyn VisibilityOracle<T>) -> Vec<Option<T>> {
    if source.is_empty() {
        return Vec::new();
    }
    let mut visible = Vec::new();
    for ingredient in source {
        let keep = match ingredient {
            None => true,
            Some(ingredient) => oracle.is_visible(ingredient),
        };
        if keep {
            visible.push(ingredient.clone());
            if visible.len() > VISIBLE_CAP {
                return visible;
            }
        }
    }
    if visible.is_empty() {
        source.to_vec()
    } else {
        visible
    }
}
