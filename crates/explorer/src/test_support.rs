use catalog::{Catalog, JsonCatalogSource, Place};
use foundation::{GeoBounds, LatLng};

use crate::surface::{DetailPanel, MapSurface, PlaceList};
use crate::view::{ListView, Marker, PlaceDetail, ZoneLayer, ZoneStyleUpdate};

pub const PLACES_JSON: &str = include_str!("../../../data/places.json");
pub const ZONES_GEOJSON: &str = include_str!("../../../data/fixtures/zones.geojson");

pub fn bundled_catalog() -> Catalog {
    Catalog::load(&JsonCatalogSource::inline(PLACES_JSON)).expect("bundled catalog")
}

pub fn place(id: &str, category: &str, zone: u8) -> Place {
    Place {
        id: id.to_string(),
        name: id.to_string(),
        category: category.to_string(),
        cuisines: Vec::new(),
        tags: Vec::new(),
        address: String::new(),
        zone: i64::from(zone),
        latitude: 48.85 + f64::from(zone) * 0.001,
        longitude: 2.35,
        description: None,
        price_note: None,
        opening_hours_note: None,
        links: Default::default(),
        images: Vec::new(),
    }
}

/// Collaborator double that records every call.
#[derive(Debug, Default)]
pub struct RecordingUi {
    pub views: Vec<(LatLng, u8)>,
    pub fitted: Vec<(GeoBounds, u32)>,
    pub marker_sets: Vec<Vec<Marker>>,
    pub layers: Vec<ZoneLayer>,
    pub zone_styles: Vec<Vec<ZoneStyleUpdate>>,
    pub shown: Vec<PlaceDetail>,
    pub hidden: usize,
    pub lists: Vec<ListView>,
}

impl RecordingUi {
    pub fn last_marker_ids(&self) -> Vec<String> {
        self.marker_sets
            .last()
            .map(|m| m.iter().map(|m| m.id.clone()).collect())
            .unwrap_or_default()
    }
}

impl MapSurface for RecordingUi {
    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.views.push((center, zoom));
    }

    fn fit_bounds(&mut self, bounds: GeoBounds, padding_px: u32) {
        self.fitted.push((bounds, padding_px));
    }

    fn show_markers(&mut self, markers: &[Marker]) {
        self.marker_sets.push(markers.to_vec());
    }

    fn draw_zones(&mut self, layer: &ZoneLayer) {
        self.layers.push(layer.clone());
    }

    fn style_zones(&mut self, styles: &[ZoneStyleUpdate]) {
        self.zone_styles.push(styles.to_vec());
    }
}

impl DetailPanel for RecordingUi {
    fn show(&mut self, detail: &PlaceDetail) {
        self.shown.push(detail.clone());
    }

    fn hide(&mut self) {
        self.hidden += 1;
    }
}

impl PlaceList for RecordingUi {
    fn render(&mut self, view: &ListView) {
        self.lists.push(view.clone());
    }
}
