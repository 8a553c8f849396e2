use catalog::{Catalog, CatalogError, CategoryRegistry, Place};
use formats::BoundaryLoad;
use foundation::ZoneId;
use tracing::{debug, info};

use crate::config::BrowserConfig;
use crate::filter::FilterState;
use crate::overlay::ZoneOverlay;
use crate::query::filter_places;
use crate::selection::{MarkerIndex, Selection, SelectionContext, SelectionController};
use crate::surface::Ui;
use crate::view::{LegendItem, ListView, Marker, ZoneOption};

/// One browsing session: owns the catalog, the filter state and the selection,
/// and drives the collaborators in `U`.
///
/// Every mutating call re-renders markers and the list synchronously before it
/// returns.
#[derive(Debug)]
pub struct Browser<U: Ui> {
    config: BrowserConfig,
    catalog: Catalog,
    registry: CategoryRegistry,
    filters: FilterState,
    selection: SelectionController,
    overlay: ZoneOverlay,
    markers: MarkerIndex,
    ui: U,
}

impl<U: Ui> Browser<U> {
    /// Positions the map on the configured initial view and renders once.
    /// The zone overlay starts unavailable until [`Browser::attach_boundaries`].
    pub fn new(catalog: Catalog, registry: CategoryRegistry, config: BrowserConfig, ui: U) -> Self {
        let overlay = ZoneOverlay::new(
            BoundaryLoad::Unavailable("not loaded".to_string()),
            config.boundary_style.clone(),
        );
        let mut browser = Self {
            config,
            catalog,
            registry,
            filters: FilterState::new(),
            selection: SelectionController::new(),
            overlay,
            markers: MarkerIndex::new(),
            ui,
        };
        let view = browser.config.initial_view;
        browser.ui.set_view(view.center(), view.zoom);
        browser.refresh();
        info!(places = browser.catalog.len(), "browser ready");
        browser
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn overlay(&self) -> &ZoneOverlay {
        &self.overlay
    }

    pub fn selection(&self) -> &Selection {
        self.selection.selection()
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    /// Current filter result, in catalog order.
    pub fn filtered(&self) -> Vec<&Place> {
        filter_places(&self.catalog, &self.filters)
    }

    pub fn legend(&self) -> Vec<LegendItem> {
        LegendItem::build_all(&self.registry, &self.filters)
    }

    pub fn zone_options(&self) -> Vec<ZoneOption> {
        ZoneOption::build_all(&self.filters)
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.filters.set_search_text(text);
        self.refresh();
    }

    pub fn toggle_category(&mut self, category: &str) -> bool {
        let active = self.filters.toggle_category(category);
        self.refresh();
        active
    }

    pub fn set_selected_zones(&mut self, zones: impl IntoIterator<Item = ZoneId>) {
        self.filters.set_selected_zones(zones);
        self.restyle_zones();
        self.refresh();
    }

    pub fn set_active_zone(&mut self, zone: Option<ZoneId>) -> Option<ZoneId> {
        let active = self.filters.set_active_zone(zone);
        self.restyle_zones();
        self.refresh();
        active
    }

    /// Click on zone polygon `index`: toggles the active zone and fits the map
    /// on the polygon. No-op for unlabeled polygons or without boundaries.
    pub fn click_zone(&mut self, index: usize) -> Option<ZoneId> {
        let click = self.overlay.click(index, &mut self.filters)?;
        if let Some(bounds) = click.bounds {
            self.ui.fit_bounds(bounds, self.config.fit_padding_px);
        }
        self.restyle_zones();
        self.refresh();
        click.active_zone
    }

    /// Clears every filter and closes the detail panel.
    pub fn reset(&mut self) {
        self.filters.reset();
        self.restyle_zones();
        self.selection.close(&mut self.ui);
        self.refresh();
    }

    /// Opens the detail view for `id` and focuses the map on its marker.
    ///
    /// Returns `false` (and changes nothing) for ids that are not rendered.
    pub fn select_place(&mut self, id: &str) -> bool {
        let ctx = SelectionContext {
            catalog: &self.catalog,
            markers: &self.markers,
            registry: &self.registry,
            config: &self.config,
        };
        self.selection.select(id, &ctx, &mut self.ui)
    }

    pub fn close_detail(&mut self) {
        self.selection.close(&mut self.ui);
    }

    /// A click on the map outside any marker or panel.
    pub fn map_clicked(&mut self) {
        self.close_detail();
    }

    pub fn append_place(&mut self, place: Place) -> Result<(), CatalogError> {
        self.catalog.append(place)?;
        self.refresh();
        Ok(())
    }

    /// Installs the result of the one-shot boundary load and draws the
    /// polygons when it succeeded.
    pub fn attach_boundaries(&mut self, load: BoundaryLoad) {
        self.overlay = ZoneOverlay::new(load, self.config.boundary_style.clone());
        if let Some(layer) = self.overlay.layer(self.filters.active_zone()) {
            self.ui.draw_zones(&layer);
        }
    }

    fn restyle_zones(&mut self) {
        if !self.overlay.is_available() {
            return;
        }
        let styles = self.overlay.styles(self.filters.active_zone());
        self.ui.style_zones(&styles);
    }

    fn refresh(&mut self) {
        let places = filter_places(&self.catalog, &self.filters);
        let markers: Vec<Marker> = places
            .iter()
            .map(|p| Marker::for_place(p, &self.registry))
            .collect();
        let list = ListView::build(&places, &self.registry, &self.config);
        debug!(shown = places.len(), total = self.catalog.len(), "filters applied");

        self.markers.rebuild(&markers);
        self.ui.show_markers(&markers);
        self.ui.render(&list);
    }
}
