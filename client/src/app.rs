use leptos::prelude::*;

use crate::canvas::MapCanvas;
use crate::dom;

/// Root component. Counters live in the host page; only the map is mounted here.
#[component]
pub fn App() -> impl IntoView {
    let config = dom::read_config();
    view! { <MapCanvas config=config /> }
}
