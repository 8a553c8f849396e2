use foundation::{GeoBounds, LatLng};

use crate::view::{ListView, Marker, PlaceDetail, ZoneLayer, ZoneStyleUpdate};

/// Map rendering capability (tiles, markers, zone polygons).
pub trait MapSurface {
    fn set_view(&mut self, center: LatLng, zoom: u8);
    fn fit_bounds(&mut self, bounds: GeoBounds, padding_px: u32);
    /// Replaces the whole marker set.
    fn show_markers(&mut self, markers: &[Marker]);
    /// Draws the zone polygons once boundaries are loaded.
    fn draw_zones(&mut self, layer: &ZoneLayer);
    /// Restyles zone polygons by feature index.
    fn style_zones(&mut self, styles: &[ZoneStyleUpdate]);
}

/// Detail side panel for the selected place.
pub trait DetailPanel {
    fn show(&mut self, detail: &PlaceDetail);
    fn hide(&mut self);
}

/// Result list next to the map.
pub trait PlaceList {
    fn render(&mut self, view: &ListView);
}

/// Everything a [`crate::Browser`] drives.
pub trait Ui: MapSurface + DetailPanel + PlaceList {}

impl<T: MapSurface + DetailPanel + PlaceList> Ui for T {}
