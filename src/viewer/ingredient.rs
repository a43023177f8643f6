//! Ingredient domains and the collaborators a slot group consumes.
//!
//! Everything the slot model knows about an ingredient goes through these
//! traits: how to draw it, how to match it against a focus, whether it may be
//! shown, and which tag (if any) names a set of items.

use std::collections::HashSet;
use std::fmt::Debug;
use std::rc::Rc;

use super::cycle::Clock;
use super::error::{RenderError, TooltipError};
use super::surface::{Surface, TooltipLine};
use crate::game::fluids::FluidStack;
use crate::game::items::{ItemId, ItemStack};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IngredientKind {
    ItemStack,
    Fluid,
}

pub trait Ingredient: Clone + Debug + 'static {
    const KIND: IngredientKind;

    /// Item identity used for tag equivalence. Stack size is not part of it.
    fn item_id(&self) -> Option<ItemId> {
        None
    }
}

impl Ingredient for ItemStack {
    const KIND: IngredientKind = IngredientKind::ItemStack;

    fn item_id(&self) -> Option<ItemId> {
        Some(self.item)
    }
}

impl Ingredient for FluidStack {
    const KIND: IngredientKind = IngredientKind::Fluid;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotRole {
    Input,
    Output,
}

impl SlotRole {
    pub fn matches(self, mode: FocusMode) -> bool {
        matches!(
            (self, mode),
            (SlotRole::Input, FocusMode::Input) | (SlotRole::Output, FocusMode::Output)
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FocusMode {
    Input,
    Output,
}

/// The ingredient the user is looking up, and which side of a recipe it sits on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Focus<T> {
    pub mode: FocusMode,
    pub value: T,
}

impl<T> Focus<T> {
    pub fn new(mode: FocusMode, value: T) -> Self {
        Self { mode, value }
    }
}

pub trait IngredientHelper<T> {
    /// First candidate equivalent to `value`, if any. Blank entries never match.
    fn match_focus(&self, candidates: &[Option<T>], value: &T) -> Option<T>;
}

pub trait IngredientRenderer<T> {
    /// Draw `value` with its top-left corner at `(x, y)`. `None` draws nothing.
    fn render(&self, surface: &mut dyn Surface, x: i32, y: i32, value: Option<&T>) -> Result<(), RenderError>;

    fn font_for(&self, value: &T) -> egui::FontId;

    fn tooltip_lines(&self, value: &T) -> Result<Vec<TooltipLine>, TooltipError>;
}

pub trait VisibilityOracle<T> {
    fn is_visible(&self, ingredient: &T) -> bool;
}

pub trait TagResolver {
    /// A tag whose member set equals `items` exactly.
    fn tag_of_exact_set(&self, items: &HashSet<ItemId>) -> Option<String>;
}

pub trait ModIdHelper {
    fn mod_name(&self, namespace: &str) -> String;
}

pub trait Translator {
    fn translate(&self, key: &str, args: &[&str]) -> String;
}

/// Everything a slot group needs from the host, injected once at construction.
pub struct Collaborators<T> {
    pub renderer: Rc<dyn IngredientRenderer<T>>,
    pub helper: Rc<dyn IngredientHelper<T>>,
    pub visibility: Rc<dyn VisibilityOracle<T>>,
    pub tags: Option<Rc<dyn TagResolver>>,
    pub translator: Rc<dyn Translator>,
    pub clock: Rc<dyn Clock>,
}

impl<T> Clone for Collaborators<T> {
    fn clone(&self) -> Self {
        Self {
            renderer: Rc::clone(&self.renderer),
            helper: Rc::clone(&self.helper),
            visibility: Rc::clone(&self.visibility),
            tags: self.tags.clone(),
            translator: Rc::clone(&self.translator),
            clock: Rc::clone(&self.clock),
        }
    }
}
