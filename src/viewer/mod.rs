//! Ingredient slots of the recipe viewer: focus resolution, visibility
//! filtering, timed cycling, hit-testing and tooltip composition.

pub mod cycle;
pub mod error;
pub mod group;
pub mod ingredient;
pub mod slot;
pub mod surface;
pub mod tooltip;
