pub mod icons;
pub mod ingredients;
pub mod integration;
pub mod painter;
pub mod recipe_viewer;
pub mod style;
