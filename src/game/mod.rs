pub mod config;
pub mod fluids;
pub mod inventory;
pub mod items;
pub mod lang;
pub mod recipes;
pub mod tags;
