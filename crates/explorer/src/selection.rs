use std::collections::HashMap;

use catalog::{Catalog, CategoryRegistry};
use foundation::LatLng;
use tracing::{debug, warn};

use crate::config::BrowserConfig;
use crate::surface::{DetailPanel, MapSurface};
use crate::view::{Marker, PlaceDetail};

/// Positions of the markers currently on the map, by place id.
///
/// Rebuilt on every render, so it always mirrors the filtered set.
#[derive(Debug, Default, Clone)]
pub struct MarkerIndex {
    positions: HashMap<String, LatLng>,
}

impl MarkerIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rebuild(&mut self, markers: &[Marker]) {
        self.positions.clear();
        self.positions.extend(
            markers
                .iter()
                .map(|m| (m.id.clone(), LatLng::new(m.lat, m.lng))),
        );
    }

    pub fn position(&self, id: &str) -> Option<LatLng> {
        self.positions.get(id).copied()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Closed,
    Open(String),
}

impl Selection {
    pub fn open_id(&self) -> Option<&str> {
        match self {
            Selection::Open(id) => Some(id),
            Selection::Closed => None,
        }
    }
}

/// Tracks the single place shown in the detail panel.
#[derive(Debug, Default, Clone)]
pub struct SelectionController {
    selection: Selection,
}

/// What selection needs to read while opening a place.
pub struct SelectionContext<'a> {
    pub catalog: &'a Catalog,
    pub markers: &'a MarkerIndex,
    pub registry: &'a CategoryRegistry,
    pub config: &'a BrowserConfig,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_open(&self) -> bool {
        matches!(self.selection, Selection::Open(_))
    }

    /// Opens `id`, replacing whatever was open.
    ///
    /// The place must exist in the catalog and currently be rendered. Stale
    /// ids are logged and ignored; the previous selection stays as it was.
    ///
    /// Returns `true` if the place was opened.
    pub fn select<S>(&mut self, id: &str, ctx: &SelectionContext<'_>, ui: &mut S) -> bool
    where
        S: MapSurface + DetailPanel + ?Sized,
    {
        let Some(place) = ctx.catalog.get(id) else {
            warn!(id, "selection ignored: unknown place");
            return false;
        };
        let Some(position) = ctx.markers.position(id) else {
            warn!(id, "selection ignored: place is not in the current result");
            return false;
        };

        ui.set_view(position, ctx.config.focus_zoom);
        ui.show(&PlaceDetail::build(place, ctx.registry, ctx.config));
        self.selection = Selection::Open(place.id.clone());
        debug!(id, "place opened");
        true
    }

    /// Closes the detail panel. Closing when already closed is a no-op.
    pub fn close<S>(&mut self, ui: &mut S)
    where
        S: DetailPanel + ?Sized,
    {
        if let Selection::Open(id) = std::mem::take(&mut self.selection) {
            ui.hide();
            debug!(id, "place closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MarkerIndex, Selection, SelectionContext, SelectionController};
    use crate::config::BrowserConfig;
    use crate::test_support::{RecordingUi, bundled_catalog};
    use crate::view::Marker;
    use catalog::CategoryRegistry;
    use foundation::LatLng;
    use pretty_assertions::assert_eq;

    fn rendered(ids: &[&str]) -> (catalog::Catalog, MarkerIndex) {
        let catalog = bundled_catalog();
        let registry = CategoryRegistry::builtin();
        let markers: Vec<Marker> = ids
            .iter()
            .filter_map(|id| catalog.get(id))
            .map(|p| Marker::for_place(p, &registry))
            .collect();
        let mut index = MarkerIndex::new();
        index.rebuild(&markers);
        (catalog, index)
    }

    #[test]
    fn select_opens_and_focuses_the_map() {
        let (catalog, markers) = rendered(&["yoru", "sanukiya"]);
        let registry = CategoryRegistry::builtin();
        let config = BrowserConfig::default();
        let ctx = SelectionContext {
            catalog: &catalog,
            markers: &markers,
            registry: &registry,
            config: &config,
        };
        let mut ui = RecordingUi::default();
        let mut sel = SelectionController::new();

        assert!(sel.select("yoru", &ctx, &mut ui));
        assert_eq!(sel.selection(), &Selection::Open("yoru".to_string()));
        assert_eq!(ui.views, vec![(LatLng::new(48.8544, 2.3717), 16)]);
        assert_eq!(ui.shown[0].name, "Yoru");

        // A second selection replaces the first.
        assert!(sel.select("sanukiya", &ctx, &mut ui));
        assert_eq!(sel.selection().open_id(), Some("sanukiya"));
        assert_eq!(ui.shown.len(), 2);
        assert_eq!(ui.hidden, 0);
    }

    #[test]
    fn stale_ids_are_ignored() {
        let (catalog, markers) = rendered(&["yoru"]);
        let registry = CategoryRegistry::builtin();
        let config = BrowserConfig::default();
        let ctx = SelectionContext {
            catalog: &catalog,
            markers: &markers,
            registry: &registry,
            config: &config,
        };
        let mut ui = RecordingUi::default();
        let mut sel = SelectionController::new();

        assert!(!sel.select("does-not-exist", &ctx, &mut ui));
        // In the catalog but filtered out of the rendered set.
        assert!(!sel.select("sanukiya", &ctx, &mut ui));
        assert_eq!(sel.selection(), &Selection::Closed);

        assert!(sel.select("yoru", &ctx, &mut ui));
        assert!(!sel.select("sanukiya", &ctx, &mut ui));
        assert_eq!(sel.selection().open_id(), Some("yoru"));
        assert!(ui.views.len() == 1 && ui.shown.len() == 1);
    }

    #[test]
    fn close_hides_once() {
        let (catalog, markers) = rendered(&["yoru"]);
        let registry = CategoryRegistry::builtin();
        let config = BrowserConfig::default();
        let ctx = SelectionContext {
            catalog: &catalog,
            markers: &markers,
            registry: &registry,
            config: &config,
        };
        let mut ui = RecordingUi::default();
        let mut sel = SelectionController::new();

        sel.close(&mut ui);
        assert_eq!(ui.hidden, 0);

        sel.select("yoru", &ctx, &mut ui);
        sel.close(&mut ui);
        sel.close(&mut ui);
        assert_eq!(ui.hidden, 1);
        assert!(!sel.is_open());
    }
}
