use crate::catalog::Category;

/// A part of the page that counts as "inside" for outside-click detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    PaletteControl,
    MetricDropdown,
}

/// Open/closed state of the palette selector and the metric dropdown.
///
/// Clicks bubble: a container the click landed in calls [`MenuState::click_inside`]
/// first, then the page root calls [`MenuState::click_outside_all`], which
/// collapses whatever was not marked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuState {
    palette_expanded: bool,
    metric_options_open: bool,
    expanded_category: Option<Category>,
    inside: Vec<Region>,
}

impl MenuState {
    pub fn palette_expanded(&self) -> bool {
        self.palette_expanded
    }

    pub fn metric_options_open(&self) -> bool {
        self.metric_options_open
    }

    pub fn expanded_category(&self) -> Option<Category> {
        self.expanded_category
    }

    pub fn is_category_expanded(&self, category: Category) -> bool {
        self.expanded_category == Some(category)
    }

    pub fn toggle_palette(&mut self) {
        self.palette_expanded = !self.palette_expanded;
    }

    pub fn collapse_palette(&mut self) {
        self.palette_expanded = false;
    }

    pub fn toggle_metric_options(&mut self) {
        self.metric_options_open = !self.metric_options_open;
    }

    /// Expand `category`, collapsing any other; a second click collapses it.
    pub fn toggle_category(&mut self, category: Category) {
        self.expanded_category = if self.is_category_expanded(category) {
            None
        } else {
            Some(category)
        };
    }

    /// A metric was picked: collapse all categories and close the panel.
    pub fn close_metric_menus(&mut self) {
        self.expanded_category = None;
        self.metric_options_open = false;
    }

    pub fn click_inside(&mut self, region: Region) {
        if !self.inside.contains(&region) {
            self.inside.push(region);
        }
    }

    /// End of a click's propagation. Menus whose region was not clicked close.
    pub fn click_outside_all(&mut self) {
        if !self.inside.contains(&Region::PaletteControl) {
            self.palette_expanded = false;
        }
        if !self.inside.contains(&Region::MetricDropdown) {
            self.metric_options_open = false;
        }
        self.inside.clear();
    }
}
