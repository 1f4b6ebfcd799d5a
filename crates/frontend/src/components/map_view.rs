use std::rc::Rc;

use choropleth_shared::render::MAP_CONTAINER_ID;
use choropleth_shared::viewer::Viewer;
use dioxus::prelude::*;
use tracing::{error, info};

use crate::deck::MapEngine;

/// Host element for the map engine. The engine is created once the
/// container is in the DOM and drawn immediately with the current state.
#[component]
pub fn MapView(viewer: Signal<Viewer>, engine: Signal<Option<Rc<MapEngine>>>) -> Element {
    let mut engine = engine;

    rsx! {
        div {
            id: MAP_CONTAINER_ID,
            onmounted: move |_| {
                if engine.peek().is_some() {
                    return;
                }
                let geojson = viewer.peek().dataset().geojson.clone();
                let mounted = MapEngine::mount(&geojson, move |picked| {
                    viewer.peek().tooltip(picked).map(|t| t.payload())
                });
                match mounted {
                    Ok(map) => {
                        if let Err(e) = map.redraw(&viewer.peek().layer()) {
                            error!(error = ?e, "initial map draw failed");
                        }
                        info!(features = viewer.peek().dataset().len(), "map ready");
                        engine.set(Some(Rc::new(map)));
                    }
                    Err(e) => error!(error = ?e, "failed to create map engine"),
                }
            },
        }
    }
}
