use foundation::LatLng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub lat: f64,
    pub lng: f64,
    pub zoom: u8,
}

impl MapView {
    pub fn center(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

/// Colors and weights of the zone polygons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryStyleConfig {
    pub stroke_color: String,
    pub fill_color: String,
    pub active_fill_color: String,
    pub weight: f32,
    pub active_weight: f32,
    pub fill_opacity: f32,
    pub active_fill_opacity: f32,
    pub hover_fill_opacity: f32,
}

impl Default for BoundaryStyleConfig {
    fn default() -> Self {
        Self {
            stroke_color: "#334155".to_string(),
            fill_color: "#cbd5e1".to_string(),
            active_fill_color: "#93c5fd".to_string(),
            weight: 1.0,
            active_weight: 2.0,
            fill_opacity: 0.12,
            active_fill_opacity: 0.25,
            hover_fill_opacity: 0.22,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub initial_view: MapView,
    /// Zoom used when a place is focused.
    pub focus_zoom: u8,
    /// Padding applied when fitting the map to a clicked zone.
    pub fit_padding_px: u32,
    /// Relative path of the zone boundary GeoJSON.
    pub boundary_path: String,
    pub boundary_style: BoundaryStyleConfig,
    pub empty_list_message: String,
    pub no_photos_message: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            initial_view: MapView {
                lat: 48.8566,
                lng: 2.3522,
                zoom: 12,
            },
            focus_zoom: 16,
            fit_padding_px: 20,
            boundary_path: "data/arrondissements.geojson".to_string(),
            boundary_style: BoundaryStyleConfig::default(),
            empty_list_message: "Aucun lieu trouvé avec ces filtres.".to_string(),
            no_photos_message: "Aucune photo pour le moment.".to_string(),
        }
    }
}

impl BrowserConfig {
    /// Missing fields keep their defaults.
    pub fn from_json_str(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}
