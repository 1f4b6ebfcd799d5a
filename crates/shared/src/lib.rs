pub mod animation;
pub mod calc;
pub mod catalog;
pub mod colors;
pub mod format;
pub mod legend;
pub mod menus;
pub mod models;
pub mod render;
pub mod viewer;
