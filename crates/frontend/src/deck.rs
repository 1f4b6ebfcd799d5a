//! Bindings to the deck.gl bundle loaded as the global `deck`, and the
//! handle that owns the engine instance plus every closure handed to it.

use std::cell::RefCell;

use choropleth_shared::render::{DeckProps, LayerSpec, TooltipPayload};
use js_sys::{Array, Object, Reflect};
use serde::Serialize;
use tracing::debug;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = deck, js_name = DeckGL)]
    #[derive(Clone)]
    type DeckGl;

    #[wasm_bindgen(catch, constructor, js_namespace = deck, js_class = "DeckGL")]
    fn new(props: &JsValue) -> Result<DeckGl, JsValue>;

    #[wasm_bindgen(method, js_name = setProps)]
    fn set_props(this: &DeckGl, props: &JsValue);

    #[wasm_bindgen(method)]
    fn finalize(this: &DeckGl);
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = deck, js_name = GeoJsonLayer)]
    type GeoJsonLayer;

    #[wasm_bindgen(catch, constructor, js_namespace = deck, js_class = "GeoJsonLayer")]
    fn new(props: &JsValue) -> Result<GeoJsonLayer, JsValue>;
}

type FillAccessor = Closure<dyn Fn(JsValue, JsValue) -> JsValue>;
type Callback = Closure<dyn Fn(JsValue) -> JsValue>;

/// Convert to a plain JS object (maps as objects, not `Map`s).
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    Ok(value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?)
}

fn set(target: &JsValue, key: &str, value: &JsValue) -> Result<(), JsValue> {
    Reflect::set(target, &JsValue::from_str(key), value)?;
    Ok(())
}

/// Reads `info.index` from a picking info object; `-1` means nothing picked.
fn picked_index(info: &JsValue) -> Option<usize> {
    let object = Reflect::get(info, &JsValue::from_str("object")).ok()?;
    if object.is_null() || object.is_undefined() {
        return None;
    }
    let index = Reflect::get(info, &JsValue::from_str("index")).ok()?.as_f64()?;
    (index >= 0.0).then_some(index as usize)
}

fn rgba(color: [u8; 4]) -> JsValue {
    let [r, g, b, a] = color;
    Array::of4(&r.into(), &g.into(), &b.into(), &a.into()).into()
}

/// One mounted deck.gl instance. Dropping it finalizes the engine before
/// the closures it calls into are released.
pub struct MapEngine {
    deck: DeckGl,
    data: JsValue,
    fill: RefCell<Option<FillAccessor>>,
    // The engine may still call the previous layer's accessor while it diffs.
    retired_fill: RefCell<Option<FillAccessor>>,
    _on_view_state_change: Callback,
    _get_tooltip: Callback,
}

impl MapEngine {
    /// Create the engine in the map container. `tooltip` is asked for a hover
    /// card with the picked feature index on every pointer move.
    pub fn mount<F>(geojson: &serde_json::Value, tooltip: F) -> Result<Self, JsValue>
    where
        F: Fn(Option<usize>) -> Option<TooltipPayload> + 'static,
    {
        let props = to_js(&DeckProps::default())?;
        let deck = DeckGl::new(&props)?;

        let camera = deck.clone();
        let on_view_state_change = Callback::new(move |params: JsValue| {
            if let Ok(view_state) = Reflect::get(&params, &JsValue::from_str("viewState")) {
                let update = Object::new();
                if Reflect::set(&update, &JsValue::from_str("viewState"), &view_state).is_ok() {
                    camera.set_props(&update);
                }
            }
            JsValue::UNDEFINED
        });

        let get_tooltip = Callback::new(move |info: JsValue| {
            tooltip(picked_index(&info))
                .and_then(|payload| to_js(&payload).ok())
                .unwrap_or(JsValue::NULL)
        });

        let callbacks: JsValue = Object::new().into();
        set(&callbacks, "onViewStateChange", on_view_state_change.as_ref())?;
        set(&callbacks, "getTooltip", get_tooltip.as_ref())?;
        deck.set_props(&callbacks);

        debug!("map engine mounted");
        Ok(Self {
            deck,
            data: to_js(geojson)?,
            fill: RefCell::new(None),
            retired_fill: RefCell::new(None),
            _on_view_state_change: on_view_state_change,
            _get_tooltip: get_tooltip,
        })
    }

    /// Replace the layer list with a single freshly built county layer.
    pub fn redraw(&self, layer: &LayerSpec) -> Result<(), JsValue> {
        let snapshot = layer.clone();
        let fill = FillAccessor::new(move |_object: JsValue, info: JsValue| {
            let index = Reflect::get(&info, &JsValue::from_str("index"))
                .ok()
                .and_then(|i| i.as_f64())
                .filter(|i| *i >= 0.0);
            match index {
                Some(i) => rgba(snapshot.fill_color_at(i as usize)),
                None => rgba([0, 0, 0, 0]),
            }
        });

        let props = to_js(&layer.props())?;
        set(&props, "data", &self.data)?;
        set(&props, "getFillColor", fill.as_ref())?;
        let geojson_layer = GeoJsonLayer::new(&props)?;

        let update: JsValue = Object::new().into();
        set(&update, "layers", &Array::of1(&geojson_layer).into())?;
        self.deck.set_props(&update);

        let previous = self.fill.replace(Some(fill));
        self.retired_fill.replace(previous);
        debug!(
            metric = %layer.update_triggers.get_fill_color.0,
            palette = %layer.update_triggers.get_fill_color.1,
            "map redrawn"
        );
        Ok(())
    }
}

impl Drop for MapEngine {
    fn drop(&mut self) {
        self.deck.finalize();
    }
}
