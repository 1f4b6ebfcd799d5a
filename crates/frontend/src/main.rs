mod api;
mod components;
mod deck;
mod dom;
mod pages;

use dioxus::prelude::*;
use tracing::Level;

const CSS: Asset = asset!("/assets/main.css");

#[allow(non_snake_case)]
fn App() -> Element {
    rsx! {
        document::Stylesheet { href: CSS }
        pages::viewer::ViewerPage {}
    }
}

fn main() {
    dioxus::logger::init(Level::INFO).expect("failed to init logger");
    launch(App);
}
