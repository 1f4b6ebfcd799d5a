use choropleth_shared::animation::transition;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

fn document() -> Option<web_sys::Document> {
    web_sys::window()?.document()
}

fn element_by_id(id: &str) -> Option<HtmlElement> {
    document()?.get_element_by_id(id)?.dyn_into().ok()
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    // Only fails for read-only declarations, which inline styles never are.
    let _ = element.style().set_property(property, value);
}

/// Rendered width of the element with `id`.
pub fn offset_width(id: &str) -> Option<f64> {
    Some(f64::from(element_by_id(id)?.offset_width()))
}

/// Width `text` would take on one line in the font of the first element
/// matching `font_source`. The probe is removed before returning.
pub fn measure_text_width(text: &str, font_source: &str) -> Option<f64> {
    let window = web_sys::window()?;
    let document = window.document()?;
    let body = document.body()?;
    let source = document.query_selector(font_source).ok()??;
    let computed = window.get_computed_style(&source).ok()??;

    let probe: HtmlElement = document.create_element("span").ok()?.dyn_into().ok()?;
    set_style(&probe, "visibility", "hidden");
    set_style(&probe, "position", "absolute");
    set_style(&probe, "white-space", "nowrap");
    for property in ["font-family", "font-size", "font-weight"] {
        if let Ok(value) = computed.get_property_value(property) {
            set_style(&probe, property, &value);
        }
    }
    probe.set_text_content(Some(text));

    body.append_child(&probe).ok()?;
    let width = f64::from(probe.offset_width());
    probe.remove();
    Some(width)
}

/// Pin the element at `from` pixels wide, then transition its width to `to`.
/// Returns false if the element is not mounted.
pub fn animate_width(id: &str, from: f64, to: f64, duration_ms: u32) -> bool {
    let Some(element) = element_by_id(id) else {
        return false;
    };
    set_style(&element, "transition", "none");
    set_style(&element, "width", &format!("{from}px"));
    element.offset_width();
    set_style(&element, "transition", &transition("width", duration_ms, "ease"));
    set_style(&element, "width", &format!("{to}px"));
    true
}

/// Flush pending style changes so the next one on `id` starts a transition.
pub fn force_reflow(id: &str) {
    if let Some(element) = element_by_id(id) {
        element.offset_width();
    }
}

/// Hide the page's tooltip element and the engine's own tooltip container.
pub fn hide_tooltips() {
    let Some(document) = document() else {
        return;
    };
    if let Some(element) = element_by_id("tooltip") {
        set_style(&element, "display", "none");
    }
    if let Ok(Some(element)) = document.query_selector(".deck-tooltip") {
        if let Ok(element) = element.dyn_into::<HtmlElement>() {
            set_style(&element, "display", "none");
        }
    }
}
