use std::rc::Rc;

use choropleth_shared::animation::{
    AnimationTimings, GradientCrossfade, LegendAnimator, ResizeStep, Ticket, TitleAnimator,
};
use choropleth_shared::catalog;
use choropleth_shared::legend::LegendContent;
use choropleth_shared::menus::MenuState;
use choropleth_shared::models::Dataset;
use choropleth_shared::render::MAP_CONTAINER_ID;
use choropleth_shared::viewer::{Effect, Viewer};
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use tracing::{debug, info, warn};

use crate::api;
use crate::components::legend::{Legend, LEGEND_OVERLAY_ID};
use crate::components::map_view::MapView;
use crate::components::palette_control::PaletteControl;
use crate::components::title_bar::{TitleBar, TITLE_ID, TITLE_TEXT_SELECTOR};
use crate::deck::MapEngine;
use crate::dom;

#[component]
pub fn ViewerPage() -> Element {
    let dataset = use_resource(|| api::fetch_dataset());

    let element = match &*dataset.read() {
        Some(Ok(dataset)) => rsx! {
            LoadedViewer { dataset: dataset.clone() }
        },
        // Still loading, or failed (already logged): nothing is interactive.
        _ => rsx! {
            InertShell {}
        },
    };
    element
}

#[component]
fn InertShell() -> Element {
    let title = catalog::title_for(catalog::DEFAULT_METRIC);

    rsx! {
        div { class: "app inert",
            div { id: "header",
                div { id: TITLE_ID,
                    span { class: "title-text", "{title}" }
                    div { id: "metric-dropdown",
                        button { id: "metric-button", disabled: true,
                            span { class: "metric-icon", "▾" }
                        }
                    }
                }
            }
            div { id: MAP_CONTAINER_ID }
        }
    }
}

/// Every piece of page state an effect can touch.
#[derive(Clone, Copy)]
struct Handles {
    timings: AnimationTimings,
    viewer: Signal<Viewer>,
    engine: Signal<Option<Rc<MapEngine>>>,
    title: Signal<TitleAnimator>,
    legend: Signal<LegendAnimator>,
    legend_content: Signal<LegendContent>,
    crossfade: Signal<GradientCrossfade>,
}

impl Handles {
    fn apply(self, effects: Vec<Effect>) {
        for effect in effects {
            debug!(?effect, "applying effect");
            match effect {
                Effect::RedrawMap => self.redraw_map(),
                Effect::CrossfadeLegend => self.crossfade_legend(),
                Effect::AnimateTitle(text) => self.animate_title(text),
                Effect::RebuildLegend => self.rebuild_legend(),
                Effect::HideTooltip => dom::hide_tooltips(),
            }
        }
    }

    fn redraw_map(self) {
        let Some(map) = self.engine.peek().as_ref().cloned() else {
            return;
        };
        let layer = self.viewer.peek().layer();
        if let Err(e) = map.redraw(&layer) {
            warn!(error = ?e, "map redraw failed");
        }
    }

    fn crossfade_legend(mut self) {
        let background = self.viewer.peek().legend_background();
        let ticket = self.crossfade.write().start(background);
        spawn(async move {
            // Let the transparent overlay land in the DOM before it starts fading in.
            TimeoutFuture::new(0).await;
            dom::force_reflow(LEGEND_OVERLAY_ID);
            if !self.crossfade.write().reveal(ticket) {
                return;
            }
            TimeoutFuture::new(self.timings.crossfade_ms).await;
            self.crossfade.write().finish(ticket);
        });
    }

    fn animate_title(mut self, text: String) {
        let ticket = self.title.write().request(text);
        spawn(async move {
            TimeoutFuture::new(self.timings.title_fade_ms).await;
            let Some(text) = self.title.write().fade_out_elapsed(ticket).map(str::to_owned) else {
                return;
            };

            let measured = dom::offset_width(TITLE_ID)
                .zip(dom::measure_text_width(&text, TITLE_TEXT_SELECTOR));
            let step = match measured {
                Some((current, text_px)) => self.title.write().begin_resize(ticket, current, text_px),
                None => {
                    warn!("title not measurable, swapping text without resize");
                    self.title
                        .write()
                        .skip_resize(ticket)
                        .then_some(ResizeStep::Skip)
                }
            };

            match step {
                // The fade-in resumes from the container's width `transitionend`.
                Some(ResizeStep::Animate { from, to }) => {
                    if !dom::animate_width(TITLE_ID, from, to, self.timings.title_resize_ms) {
                        warn!("title container went missing during resize");
                    }
                }
                Some(ResizeStep::Skip) => self.finish_title(ticket).await,
                None => {}
            }
        });
    }

    fn title_transition_ended(mut self, property: String) {
        let ticket = self.title.write().transition_ended(&property);
        if let Some(ticket) = ticket {
            spawn(self.finish_title(ticket));
        }
    }

    async fn finish_title(mut self, ticket: Ticket) {
        TimeoutFuture::new(self.timings.title_fade_ms).await;
        self.title.write().fade_in_elapsed(ticket);
    }

    fn rebuild_legend(mut self) {
        let ticket = self.legend.write().request();
        spawn(async move {
            TimeoutFuture::new(self.timings.legend_hide_after_ms()).await;
            if !self.legend.write().hide_elapsed(ticket) {
                return;
            }
            let (content, background) = {
                let viewer = self.viewer.peek();
                (viewer.legend_content(), viewer.legend_background())
            };
            self.legend_content.set(content);
            self.crossfade.write().reset(background);

            TimeoutFuture::new(self.timings.legend_hold_ms()).await;
            if !self.legend.write().hold_elapsed(ticket) {
                return;
            }
            TimeoutFuture::new(self.timings.legend_fade_ms).await;
            self.legend.write().fade_in_elapsed(ticket);
        });
    }
}

#[component]
fn LoadedViewer(dataset: Dataset) -> Element {
    let timings = AnimationTimings::default();
    let viewer = use_signal(|| Viewer::new(dataset.clone()));
    let engine = use_signal(|| None::<Rc<MapEngine>>);
    let title = use_signal(|| TitleAnimator::new(viewer.peek().title(), timings));
    let legend = use_signal(LegendAnimator::default);
    let legend_content = use_signal(|| viewer.peek().legend_content());
    let crossfade = use_signal(|| GradientCrossfade::new(viewer.peek().legend_background()));
    let mut menus = use_signal(MenuState::default);

    let mut handles = Handles {
        timings,
        viewer,
        engine,
        title,
        legend,
        legend_content,
        crossfade,
    };

    let state = viewer.read().state().clone();

    rsx! {
        div {
            class: "app",
            onpointerdown: move |_| {
                let effects = handles.viewer.write().pointer_down();
                handles.apply(effects);
            },
            onpointerup: move |_| handles.viewer.write().pointer_up(),
            onclick: move |_| menus.write().click_outside_all(),

            div { id: "header",
                TitleBar {
                    title,
                    active_metric: state.metric.clone(),
                    enabled: true,
                    menus,
                    on_select_metric: move |metric: String| {
                        let effects = handles.viewer.write().select_metric(&metric);
                        if !effects.is_empty() {
                            info!(%metric, "metric selected");
                        }
                        handles.apply(effects);
                    },
                    on_width_transition_end: move |property: String| {
                        handles.title_transition_ended(property);
                    },
                }
                PaletteControl {
                    active: state.palette,
                    menus,
                    on_select: move |palette| {
                        let effects = handles.viewer.write().select_palette(palette);
                        if !effects.is_empty() {
                            info!(%palette, "palette selected");
                        }
                        handles.apply(effects);
                    },
                }
            }

            MapView { viewer, engine }

            Legend {
                content: legend_content.read().clone(),
                animator: legend.read().clone(),
                crossfade: crossfade.read().clone(),
                timings,
            }

            div { id: "tooltip" }
        }
    }
}
