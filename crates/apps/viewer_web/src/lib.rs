use std::cell::RefCell;

use catalog::{Catalog, CategoryRegistry, JsonCatalogSource, Place};
use console_error_panic_hook::set_once;
use explorer::{Browser, BrowserConfig};
use formats::BoundaryLoad;
use foundation::ZoneId;
use gloo_net::http::Request;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod hooks;
use hooks::{JsUi, to_js};

thread_local! {
    static STATE: RefCell<Option<Browser<JsUi>>> = const { RefCell::new(None) };
}

fn log_error(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(msg));
}

fn warn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}

/// Runs `f` on the live browser session.
///
/// Calls before `init_browser`, or re-entrant calls made from inside a UI
/// hook, are reported and skipped.
fn with_browser<R>(f: impl FnOnce(&mut Browser<JsUi>) -> R) -> Option<R> {
    STATE.with(|state| {
        let Ok(mut slot) = state.try_borrow_mut() else {
            log_error("browser is busy (re-entrant call from a UI hook?)");
            return None;
        };
        let Some(browser) = slot.as_mut() else {
            log_error("browser not initialized; call init_browser first");
            return None;
        };
        Some(f(browser))
    })
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

/// Builds the session from the static catalog and renders the initial view.
///
/// `config_json` may be omitted or partial; missing fields keep defaults.
#[wasm_bindgen]
pub fn init_browser(
    places_json: &str,
    config_json: Option<String>,
    hooks: JsValue,
) -> Result<(), JsValue> {
    let config = match config_json {
        Some(raw) if !raw.trim().is_empty() => BrowserConfig::from_json_str(&raw)
            .map_err(|e| JsValue::from_str(&format!("invalid config: {e}")))?,
        _ => BrowserConfig::default(),
    };
    let catalog = Catalog::load(&JsonCatalogSource::inline(places_json))
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let ui = JsUi::new(hooks)?;

    let browser = Browser::new(catalog, CategoryRegistry::builtin(), config, ui);
    STATE.with(|state| {
        *state.borrow_mut() = Some(browser);
    });
    Ok(())
}

/// Fire-and-forget fetch of the zone boundary file.
///
/// Failure leaves the browser in degraded mode (no zone clicks).
#[wasm_bindgen]
pub fn load_boundaries() {
    let Some(url) = with_browser(|b| b.config().boundary_path.clone()) else {
        return;
    };
    spawn_local(async move {
        let load = fetch_boundaries(&url).await;
        if let Some(msg) = boundary_warning(&load) {
            warn(&msg);
        }
        with_browser(|b| b.attach_boundaries(load));
    });
}

/// Console message for a degraded or partially unusable boundary load.
fn boundary_warning(load: &BoundaryLoad) -> Option<String> {
    match load {
        BoundaryLoad::Unavailable(reason) => Some(format!("zone boundaries unavailable: {reason}")),
        BoundaryLoad::Loaded(boundaries) => {
            let unlabeled = boundaries.features.iter().filter(|f| f.zone.is_none()).count();
            (unlabeled > 0).then(|| {
                format!("{unlabeled} zone boundary feature(s) without a zone number are not clickable")
            })
        }
    }
}

async fn fetch_boundaries(url: &str) -> BoundaryLoad {
    let resp = match Request::get(url).send().await {
        Ok(resp) => resp,
        Err(err) => return BoundaryLoad::unavailable(format!("fetch {url} failed: {err}")),
    };
    if !resp.ok() {
        return BoundaryLoad::unavailable(format!("fetch {url} failed: HTTP {}", resp.status()));
    }
    match resp.text().await {
        Ok(text) => BoundaryLoad::from_geojson_str(&text),
        Err(err) => BoundaryLoad::unavailable(format!("read {url} failed: {err}")),
    }
}

#[wasm_bindgen]
pub fn set_search_text(text: &str) {
    with_browser(|b| b.set_search_text(text));
}

/// Returns whether the category is active afterwards.
#[wasm_bindgen]
pub fn toggle_category(category: &str) -> bool {
    with_browser(|b| b.toggle_category(category)).unwrap_or(false)
}

/// Zones outside 1..=20 are ignored.
#[wasm_bindgen]
pub fn set_selected_zones(zones: Vec<u8>) {
    let zones: Vec<ZoneId> = zones
        .into_iter()
        .filter_map(|z| ZoneId::new(i64::from(z)))
        .collect();
    with_browser(|b| b.set_selected_zones(zones));
}

/// Click on zone polygon `index`; returns the active zone afterwards.
#[wasm_bindgen]
pub fn click_zone(index: usize) -> Option<u8> {
    with_browser(|b| b.click_zone(index))
        .flatten()
        .map(ZoneId::get)
}

#[wasm_bindgen]
pub fn zone_hover_style(index: usize) -> JsValue {
    with_browser(|b| {
        let active = b.filters().active_zone();
        to_js(&b.overlay().hover_style(index, active))
    })
    .unwrap_or(JsValue::NULL)
}

/// Style to restore when the pointer leaves a polygon.
#[wasm_bindgen]
pub fn zone_idle_style(index: usize) -> JsValue {
    with_browser(|b| {
        let active = b.filters().active_zone();
        to_js(&b.overlay().style_for(index, active))
    })
    .unwrap_or(JsValue::NULL)
}

/// Opens a place from a list entry, a marker or code. Stale ids return `false`.
#[wasm_bindgen]
pub fn select_place(id: &str) -> bool {
    let opened = with_browser(|b| b.select_place(id)).unwrap_or(false);
    if !opened {
        warn(&format!("selection ignored: {id} is not among the shown places"));
    }
    opened
}

#[wasm_bindgen]
pub fn close_detail() {
    with_browser(|b| b.close_detail());
}

#[wasm_bindgen]
pub fn map_clicked() {
    with_browser(|b| b.map_clicked());
}

#[wasm_bindgen]
pub fn reset_filters() {
    with_browser(|b| b.reset());
}

/// Appends one place record (JSON object) to the catalog.
#[wasm_bindgen]
pub fn append_place(place_json: &str) -> Result<(), JsValue> {
    let place: Place = serde_json::from_str(place_json)
        .map_err(|e| JsValue::from_str(&format!("invalid place: {e}")))?;
    with_browser(|b| b.append_place(place))
        .ok_or_else(|| JsValue::from_str("browser not available"))?
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub fn legend() -> JsValue {
    with_browser(|b| to_js(&b.legend())).unwrap_or(JsValue::NULL)
}

#[wasm_bindgen]
pub fn zone_options() -> JsValue {
    with_browser(|b| to_js(&b.zone_options())).unwrap_or(JsValue::NULL)
}

#[derive(Serialize)]
struct Facets {
    categories: Vec<String>,
    cuisines: Vec<String>,
}

#[wasm_bindgen]
pub fn facets() -> JsValue {
    with_browser(|b| {
        to_js(&Facets {
            categories: b.catalog().categories_present(),
            cuisines: b.catalog().cuisines_present(),
        })
    })
    .unwrap_or(JsValue::NULL)
}

#[wasm_bindgen]
pub fn filtered_count() -> usize {
    with_browser(|b| b.filtered().len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::boundary_warning;
    use formats::BoundaryLoad;
    use pretty_assertions::assert_eq;

    #[test]
    fn unlabeled_features_are_reported() {
        let load = BoundaryLoad::from_geojson_str(include_str!(
            "../../../../data/fixtures/zones.geojson"
        ));
        assert_eq!(
            boundary_warning(&load).as_deref(),
            Some("1 zone boundary feature(s) without a zone number are not clickable")
        );
    }

    #[test]
    fn degraded_load_is_reported() {
        let load = BoundaryLoad::unavailable("HTTP 404");
        assert_eq!(
            boundary_warning(&load).as_deref(),
            Some("zone boundaries unavailable: HTTP 404")
        );

        let clean = BoundaryLoad::from_geojson_str(
            r#"{"type":"FeatureCollection","features":[{"type":"Feature","properties":{"c_ar":3},"geometry":null}]}"#,
        );
        assert_eq!(boundary_warning(&clean), None);
    }
}
