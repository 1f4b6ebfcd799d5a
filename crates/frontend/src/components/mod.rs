pub mod legend;
pub mod map_view;
pub mod metric_menu;
pub mod palette_control;
pub mod title_bar;
