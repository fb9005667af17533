//! Page wiring: reads the config, restores the saved tab and installs the
//! document click listener once the tab widgets exist.

use crate::shared::tab_sync::{
    DomTabLabels, LocalStoragePreferenceStore, MemoryPreferenceStore, PreferenceStore,
    TabSyncController, TimeoutScheduler,
};
use contracts::shared::tab_sync::{TabSyncConfig, CONFIG_ELEMENT_ID};
use js_sys::Function;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, Event};

type BrowserController =
    TabSyncController<Box<dyn PreferenceStore>, DomTabLabels, TimeoutScheduler>;

// The document listener must be attached at most once per page.
thread_local! {
    static INSTALLED: Cell<bool> = const { Cell::new(false) };
}

/// Run now if the document is parsed, otherwise on `DOMContentLoaded`.
pub fn run() {
    let Some(document) = window().and_then(|w| w.document()) else {
        log::warn!("No document available, tab sync disabled");
        return;
    };

    if defer_until_ready(&document.ready_state()) {
        let on_ready = Closure::once_into_js(install);
        if let Err(err) = document.add_event_listener_with_callback(
            "DOMContentLoaded",
            on_ready.unchecked_ref::<Function>(),
        ) {
            log::warn!("Failed to wait for DOMContentLoaded: {:?}", err);
        }
    } else {
        install();
    }
}

/// `document.readyState` is "loading" until the parser has finished; the tab
/// widgets may not exist yet at that point.
fn defer_until_ready(ready_state: &str) -> bool {
    ready_state == "loading"
}

fn install() {
    if INSTALLED.with(|installed| installed.replace(true)) {
        return;
    }
    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };

    let config = read_config(&document);
    log::set_max_level(level_filter(&config));

    let controller = Rc::new(build_controller(&config));
    controller.restore();
    attach_click_listener(&document, controller);
}

fn read_config(document: &Document) -> TabSyncConfig {
    let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        return TabSyncConfig::default();
    };
    let json = element.text_content().unwrap_or_default();

    TabSyncConfig::from_json(&json).unwrap_or_else(|err| {
        log::warn!("Ignoring invalid #{} config: {}", CONFIG_ELEMENT_ID, err);
        TabSyncConfig::default()
    })
}

fn level_filter(config: &TabSyncConfig) -> log::LevelFilter {
    config
        .log_level_name()
        .parse::<log::Level>()
        .unwrap_or(log::Level::Info)
        .to_level_filter()
}

fn build_controller(config: &TabSyncConfig) -> BrowserController {
    let store: Box<dyn PreferenceStore> =
        match LocalStoragePreferenceStore::open(config.storage_key.clone()) {
            Some(store) => Box::new(store),
            None => {
                log::warn!("localStorage unavailable, tab preference will not persist");
                Box::new(MemoryPreferenceStore::new())
            }
        };

    TabSyncController::new(
        store,
        DomTabLabels::new(config.label_selector.clone()),
        TimeoutScheduler::new(config.defer_ms),
    )
}

fn attach_click_listener(document: &Document, controller: Rc<BrowserController>) {
    // Delegated: one listener on the document catches clicks from every group.
    let listener = Closure::wrap(Box::new(move |event: Event| {
        let clicked = event
            .target()
            .and_then(|target| controller.labels().label_for_target(&target));
        controller.handle_click(clicked.as_deref());
    }) as Box<dyn FnMut(Event)>);

    if let Err(err) =
        document.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
    {
        log::warn!("Failed to attach tab click listener: {:?}", err);
        return;
    }
    // Lives for the whole page.
    listener.forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defer_until_ready() {
        assert!(defer_until_ready("loading"));
        assert!(!defer_until_ready("interactive"));
        assert!(!defer_until_ready("complete"));
    }

    #[test]
    fn test_level_filter_defaults_to_info() {
        assert_eq!(level_filter(&TabSyncConfig::default()), log::LevelFilter::Info);
    }

    #[test]
    fn test_level_filter_follows_config() {
        let config = TabSyncConfig {
            log_level: "Debug".to_string(),
            ..TabSyncConfig::default()
        };
        assert_eq!(level_filter(&config), log::LevelFilter::Debug);

        let config = TabSyncConfig {
            log_level: "loud".to_string(),
            ..TabSyncConfig::default()
        };
        assert_eq!(level_filter(&config), log::LevelFilter::Info);
    }
}
