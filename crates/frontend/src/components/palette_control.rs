use choropleth_shared::colors::PaletteName;
use choropleth_shared::menus::{MenuState, Region};
use dioxus::prelude::*;

#[component]
pub fn PaletteControl(
    active: PaletteName,
    menus: Signal<MenuState>,
    on_select: EventHandler<PaletteName>,
) -> Element {
    let mut menus = menus;
    let expanded = menus.read().palette_expanded();

    rsx! {
        div {
            id: "palette-control-container",
            class: if expanded { "expanded" } else { "" },
            onclick: move |_| menus.write().click_inside(Region::PaletteControl),
            button {
                id: "palette-control",
                "aria-label": "Color palette",
                onclick: move |_| menus.write().toggle_palette(),
                span { class: "palette-swatch", "data-palette": active.as_str() }
            }
            div { class: "palette-options",
                for palette in PaletteName::ALL {
                    button {
                        class: if palette == active { "palette-option active" } else { "palette-option" },
                        "data-palette": palette.as_str(),
                        onclick: move |_| {
                            menus.write().collapse_palette();
                            on_select.call(palette);
                        },
                        {palette.label()}
                    }
                }
            }
        }
    }
}
