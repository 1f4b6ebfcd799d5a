use choropleth_shared::animation::{transition, AnimationTimings, GradientCrossfade, LegendAnimator};
use choropleth_shared::legend::LegendContent;
use dioxus::prelude::*;

pub const LEGEND_OVERLAY_ID: &str = "legend-gradient-overlay";

#[component]
pub fn Legend(
    content: LegendContent,
    animator: LegendAnimator,
    crossfade: GradientCrossfade,
    timings: AnimationTimings,
) -> Element {
    let items_style = format!(
        "opacity: {}; visibility: {}; transition: {};",
        animator.opacity(),
        if animator.visible() { "visible" } else { "hidden" },
        transition("opacity", timings.legend_fade_ms, "ease"),
    );
    let overlay_fade = transition("opacity", timings.crossfade_ms, "ease-out");
    let inner_style = format!("transform: {};", content.transform_css());
    let base_style = format!("background: {};", crossfade.base());
    let labels: Vec<(String, String)> = content
        .labels
        .iter()
        .map(|l| {
            (
                format!("top: {}; transform: {};", l.top_css(), l.transform_css()),
                l.text.clone(),
            )
        })
        .collect();

    rsx! {
        div { id: "legend",
            div { id: "legend-items", style: "{items_style}",
                div {
                    class: "legend-inner",
                    style: "{inner_style}",
                    div {
                        class: "legend-gradient",
                        style: "{base_style}",
                        for overlay in crossfade.overlay() {
                            div {
                                key: "{overlay.ticket}",
                                id: LEGEND_OVERLAY_ID,
                                class: "legend-gradient-overlay",
                                style: "background: {overlay.background}; opacity: {overlay.opacity}; transition: {overlay_fade};",
                            }
                        }
                    }
                    div { class: "legend-labels",
                        for (style, text) in labels {
                            div { class: "legend-label", style: "{style}", "{text}" }
                        }
                    }
                }
            }
        }
    }
}
