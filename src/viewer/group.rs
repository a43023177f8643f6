use std::collections::BTreeMap;
use std::rc::Rc;

use super::error::{RenderError, TooltipError};
use super::ingredient::{Collaborators, Focus, Ingredient, IngredientKind, SlotRole};
use super::slot::Slot;
use super::surface::{Drawable, SlotRect, Surface, TooltipLine};
use super::tooltip::TooltipCallback;

/// Standard slot cell: an 18x18 square with a 16x16 ingredient inset by 1.
pub const DEFAULT_SLOT_SIZE: i32 = 18;
pub const DEFAULT_SLOT_PADDING: i32 = 1;

/// The slots of one ingredient domain within a recipe layout. All slots share
/// the focus, the cycle phase and the tooltip callback.
pub struct SlotGroup<T: Ingredient> {
    collaborators: Collaborators<T>,
    cycle_offset: i64,
    focus: Option<Focus<T>>,
    slots: BTreeMap<usize, Slot<T>>,
    highlights: BTreeMap<usize, u32>,
    tooltip_callback: Option<Rc<TooltipCallback<T>>>,
}

impl<T: Ingredient> SlotGroup<T> {
    pub fn new(collaborators: Collaborators<T>, cycle_offset: i64) -> Self {
        Self {
            collaborators,
            cycle_offset,
            focus: None,
            slots: BTreeMap::new(),
            highlights: BTreeMap::new(),
            tooltip_callback: None,
        }
    }

    pub fn kind(&self) -> IngredientKind {
        T::KIND
    }

    /// Applies to slots populated after this call.
    pub fn set_focus(&mut self, focus: Option<Focus<T>>) {
        self.focus = focus;
    }

    pub fn focus(&self) -> Option<&Focus<T>> {
        self.focus.as_ref()
    }

    /// Create (or replace) the slot at `slot_index`.
    pub fn init(&mut self, slot_index: usize, role: SlotRole, rect: SlotRect, padding: (i32, i32)) {
        let mut slot = Slot::new(
            slot_index,
            role,
            rect,
            padding,
            self.cycle_offset,
            self.collaborators.clone(),
        );
        slot.set_tooltip_callback(self.tooltip_callback.clone());
        self.slots.insert(slot_index, slot);
    }

    /// `init` with the standard cell at (`x`, `y`).
    pub fn init_default(&mut self, slot_index: usize, role: SlotRole, x: i32, y: i32) {
        self.init(
            slot_index,
            role,
            SlotRect::new(x, y, DEFAULT_SLOT_SIZE, DEFAULT_SLOT_SIZE),
            (DEFAULT_SLOT_PADDING, DEFAULT_SLOT_PADDING),
        );
    }

    pub fn set(&mut self, slot_index: usize, candidates: Option<Vec<Option<T>>>) {
        match self.slots.get_mut(&slot_index) {
            Some(slot) => slot.set(candidates, self.focus.as_ref()),
            None => log::warn!("Slot {slot_index} was never initialised; ignoring its ingredients"),
        }
    }

    pub fn set_all(&mut self, candidates: impl IntoIterator<Item = (usize, Vec<Option<T>>)>) {
        for (slot_index, list) in candidates {
            self.set(slot_index, Some(list));
        }
    }

    pub fn set_background(&mut self, slot_index: usize, background: Box<dyn Drawable>) {
        match self.slots.get_mut(&slot_index) {
            Some(slot) => slot.set_background(background),
            None => log::warn!("Slot {slot_index} was never initialised; ignoring its background"),
        }
    }

    pub fn set_tooltip_callback<F>(&mut self, callback: F)
    where
        F: Fn(usize, SlotRole, &T, &mut Vec<TooltipLine>) -> Result<(), TooltipError> + 'static,
    {
        let callback: Rc<TooltipCallback<T>> = Rc::new(callback);
        for slot in self.slots.values_mut() {
            slot.set_tooltip_callback(Some(Rc::clone(&callback)));
        }
        self.tooltip_callback = Some(callback);
    }

    /// Overdraw a slot with `color` after its ingredient, or clear the highlight.
    pub fn set_highlight(&mut self, slot_index: usize, color: Option<u32>) {
        match color {
            Some(color) => self.highlights.insert(slot_index, color),
            None => self.highlights.remove(&slot_index),
        };
    }

    pub fn slot(&self, slot_index: usize) -> Option<&Slot<T>> {
        self.slots.get(&slot_index)
    }

    /// Slots in ascending index order.
    pub fn slots(&self) -> impl Iterator<Item = &Slot<T>> {
        self.slots.values()
    }

    /// Draw every slot, then the overlays of the first hovered one so its
    /// tooltip lands on top of its siblings. Mouse coordinates are relative to
    /// the surface origin.
    pub fn draw(
        &self,
        surface: &mut dyn Surface,
        surface_x: i32,
        surface_y: i32,
        mouse_x: i32,
        mouse_y: i32,
    ) -> Result<(), RenderError> {
        let mut hovered = None;
        for (slot_index, slot) in &self.slots {
            slot.draw(surface, surface_x, surface_y)?;
            if let Some(&color) = self.highlights.get(slot_index) {
                slot.draw_highlight(surface, color, surface_x, surface_y);
            }
            if hovered.is_none() && slot.is_mouse_over(0, 0, mouse_x, mouse_y) {
                hovered = Some(slot);
            }
        }
        if let Some(slot) = hovered {
            slot.draw_overlays(surface, surface_x, surface_y, mouse_x, mouse_y);
        }
        Ok(())
    }

    /// Index of the first enabled slot under the mouse, relative coordinates.
    pub fn get_hovered(&self, mouse_x: i32, mouse_y: i32) -> Option<usize> {
        self.slots
            .values()
            .find(|slot| slot.is_mouse_over(0, 0, mouse_x, mouse_y))
            .map(Slot::slot_index)
    }
}
