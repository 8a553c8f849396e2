use explorer::{
    DetailPanel, ListView, MapSurface, Marker, PlaceDetail, PlaceList, ZoneLayer, ZoneStyleUpdate,
};
use foundation::{GeoBounds, LatLng};
use js_sys::{Array, Function, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};

/// Collaborators implemented by the host page.
///
/// `hooks` is a plain JS object; each capability is a function property:
/// `setView(lat, lng, zoom)`, `fitBounds([[s, w], [n, e]], paddingPx)`,
/// `showMarkers(markers)`, `drawZones(layer)`, `styleZones(styles)`,
/// `showDetail(detail)`, `hideDetail()`, `renderList(view)`.
/// Missing hooks are reported once per call and skipped.
#[derive(Debug)]
pub struct JsUi {
    hooks: Object,
}

impl JsUi {
    pub fn new(hooks: JsValue) -> Result<Self, JsValue> {
        let hooks = hooks
            .dyn_into::<Object>()
            .map_err(|_| JsValue::from_str("hooks must be an object"))?;
        Ok(Self { hooks })
    }

    fn call(&self, name: &str, args: &[JsValue]) {
        let hook = match Reflect::get(&self.hooks, &JsValue::from_str(name)) {
            Ok(v) => v,
            Err(err) => {
                web_sys::console::error_2(&JsValue::from_str(&format!("hook {name}:")), &err);
                return;
            }
        };
        let Some(hook) = hook.dyn_ref::<Function>() else {
            web_sys::console::warn_1(&JsValue::from_str(&format!("missing UI hook: {name}")));
            return;
        };

        let argv = Array::new();
        for arg in args {
            argv.push(arg);
        }
        if let Err(err) = hook.apply(&self.hooks, &argv) {
            web_sys::console::error_2(&JsValue::from_str(&format!("hook {name} threw:")), &err);
        }
    }
}

/// Serializes through JSON so the host receives plain objects.
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    serde_json::to_string(value)
        .ok()
        .and_then(|s| js_sys::JSON::parse(&s).ok())
        .unwrap_or(JsValue::NULL)
}

impl MapSurface for JsUi {
    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.call(
            "setView",
            &[center.lat.into(), center.lng.into(), JsValue::from(zoom)],
        );
    }

    fn fit_bounds(&mut self, bounds: GeoBounds, padding_px: u32) {
        let sw = bounds.south_west;
        let ne = bounds.north_east;
        self.call(
            "fitBounds",
            &[
                to_js(&[[sw.lat, sw.lng], [ne.lat, ne.lng]]),
                JsValue::from(padding_px),
            ],
        );
    }

    fn show_markers(&mut self, markers: &[Marker]) {
        self.call("showMarkers", &[to_js(markers)]);
    }

    fn draw_zones(&mut self, layer: &ZoneLayer) {
        self.call("drawZones", &[to_js(layer)]);
    }

    fn style_zones(&mut self, styles: &[ZoneStyleUpdate]) {
        self.call("styleZones", &[to_js(styles)]);
    }
}

impl DetailPanel for JsUi {
    fn show(&mut self, detail: &PlaceDetail) {
        self.call("showDetail", &[to_js(detail)]);
    }

    fn hide(&mut self) {
        self.call("hideDetail", &[]);
    }
}

impl PlaceList for JsUi {
    fn render(&mut self, view: &ListView) {
        self.call("renderList", &[to_js(view)]);
    }
}
