use choropleth_shared::animation::{transition, TitleAnimator};
use choropleth_shared::menus::MenuState;
use dioxus::prelude::*;

use crate::components::metric_menu::MetricMenu;

pub const TITLE_ID: &str = "title";
pub const TITLE_TEXT_SELECTOR: &str = "#title .title-text";

/// Map title plus the metric menu. The container's width is driven
/// imperatively during the resize step, so it carries no inline style here.
#[component]
pub fn TitleBar(
    title: Signal<TitleAnimator>,
    active_metric: String,
    enabled: bool,
    menus: Signal<MenuState>,
    on_select_metric: EventHandler<String>,
    on_width_transition_end: EventHandler<String>,
) -> Element {
    let animator = title.read();
    let fade = transition("opacity", animator.timings().title_fade_ms, "ease");
    let content_style = format!("opacity: {}; transition: {fade};", animator.content_opacity());
    let text = animator.text().to_string();
    drop(animator);

    rsx! {
        div {
            id: TITLE_ID,
            ontransitionend: move |evt: Event<TransitionData>| {
                on_width_transition_end.call(evt.data().property_name());
            },
            span { class: "title-text", style: "{content_style}", "{text}" }
            MetricMenu {
                active_metric,
                icon_style: content_style.clone(),
                enabled,
                menus,
                on_select: on_select_metric,
            }
        }
    }
}
