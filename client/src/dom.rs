use gloo_storage::{LocalStorage, Storage};

use mapquest_shared::{
    CounterDisplay, CounterIds, CounterSlot, KeyValueStore, MapConfig, MapError, MemoryStore,
};

/// Id of the optional `<script type="application/json">` carrying a [`MapConfig`].
pub const CONFIG_ELEMENT_ID: &str = "map-config";

fn document() -> Option<web_sys::Document> {
    web_sys::window()?.document()
}

/// Page config, or defaults when the page doesn't provide one.
pub fn read_config() -> MapConfig {
    let Some(text) = document()
        .and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content())
    else {
        return MapConfig::default();
    };
    MapConfig::from_json_or_default(&text)
}

/// `window.localStorage`, backed by gloo.
pub struct BrowserStore;

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), MapError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| MapError::Storage(format!("{e:?}")))
    }
}

/// Local storage when the browser allows it (private modes and sandboxed
/// frames may not), otherwise progress lives only as long as the page.
pub fn open_store() -> Box<dyn KeyValueStore> {
    let available = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .is_some();
    if available {
        Box::new(BrowserStore)
    } else {
        tracing::warn!("localStorage unavailable; progress will not survive a reload");
        Box::new(MemoryStore::new())
    }
}

/// Counters rendered by the surrounding page, looked up by element id on
/// every update so late-mounted elements are picked up.
pub struct DomCounters {
    ids: CounterIds,
}

impl DomCounters {
    pub fn new(ids: CounterIds) -> Self {
        Self { ids }
    }
}

impl CounterDisplay for DomCounters {
    fn set_text(&mut self, slot: CounterSlot, text: &str) -> Result<(), MapError> {
        let id = self.ids.id_for(slot);
        let el = document()
            .and_then(|doc| doc.get_element_by_id(id))
            .ok_or_else(|| MapError::MissingElement(id.to_string()))?;
        el.set_text_content(Some(text));
        Ok(())
    }
}

/// Leave the map for `destination`. Fire-and-forget.
pub fn navigate(destination: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.location().set_href(destination) {
        tracing::warn!(destination, error = ?e, "navigation failed");
    }
}
