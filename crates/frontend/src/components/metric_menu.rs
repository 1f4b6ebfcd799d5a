use choropleth_shared::catalog::Category;
use choropleth_shared::menus::{MenuState, Region};
use dioxus::prelude::*;

/// Metric button with its category dropdown.
#[component]
pub fn MetricMenu(
    active_metric: String,
    icon_style: String,
    enabled: bool,
    menus: Signal<MenuState>,
    on_select: EventHandler<String>,
) -> Element {
    let mut menus = menus;
    let open = menus.read().metric_options_open();

    rsx! {
        div {
            id: "metric-dropdown",
            onclick: move |_| menus.write().click_inside(Region::MetricDropdown),
            button {
                id: "metric-button",
                disabled: !enabled,
                "aria-label": "Choose metric",
                onclick: move |_| {
                    if enabled {
                        menus.write().toggle_metric_options();
                    }
                },
                span { class: "metric-icon", style: "{icon_style}", "▾" }
            }
            div {
                id: "metric-options",
                class: if open { "open" } else { "" },
                for category in Category::ALL {
                    div {
                        class: if menus.read().is_category_expanded(category) { "metric-category expanded" } else { "metric-category" },
                        button {
                            class: "metric-category-btn",
                            onclick: move |_| menus.write().toggle_category(category),
                            {category.label()}
                        }
                        if menus.read().is_category_expanded(category) {
                            for metric in category.metrics() {
                                button {
                                    class: if metric.name == active_metric { "metric-option active" } else { "metric-option" },
                                    onclick: move |evt: Event<MouseData>| {
                                        evt.stop_propagation();
                                        menus.write().close_metric_menus();
                                        on_select.call(metric.name.to_string());
                                    },
                                    {metric.name}
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
