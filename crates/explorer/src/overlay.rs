use formats::{BoundaryLoad, ZoneBoundaries};
use foundation::{GeoBounds, ZoneId};
use tracing::debug;

use crate::config::BoundaryStyleConfig;
use crate::filter::FilterState;
use crate::view::{BoundaryStyle, ZoneLayer, ZoneStyleUpdate};

/// Outcome of a click on a zone polygon.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ZoneClick {
    pub zone: ZoneId,
    /// Active zone after the toggle.
    pub active_zone: Option<ZoneId>,
    /// Extent of the clicked polygon, to fit the map on.
    pub bounds: Option<GeoBounds>,
}

/// Interaction contract of the zone boundary overlay.
///
/// Emphasis is derived from the filter's active zone on every call and
/// never stored here.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneOverlay {
    load: BoundaryLoad,
    style: BoundaryStyleConfig,
}

impl Default for ZoneOverlay {
    fn default() -> Self {
        Self {
            load: BoundaryLoad::Unavailable("not loaded".to_string()),
            style: BoundaryStyleConfig::default(),
        }
    }
}

impl ZoneOverlay {
    pub fn new(load: BoundaryLoad, style: BoundaryStyleConfig) -> Self {
        Self { load, style }
    }

    pub fn is_available(&self) -> bool {
        self.load.is_loaded()
    }

    pub fn load(&self) -> &BoundaryLoad {
        &self.load
    }

    pub fn boundaries(&self) -> Option<&ZoneBoundaries> {
        match &self.load {
            BoundaryLoad::Loaded(b) => Some(b),
            BoundaryLoad::Unavailable(_) => None,
        }
    }

    fn feature_zone(&self, index: usize) -> Option<ZoneId> {
        self.boundaries()?.feature(index)?.zone
    }

    pub fn style_for(&self, index: usize, active_zone: Option<ZoneId>) -> BoundaryStyle {
        let is_active = active_zone.is_some() && self.feature_zone(index) == active_zone;
        let s = &self.style;
        if is_active {
            BoundaryStyle {
                color: s.stroke_color.clone(),
                weight: s.active_weight,
                fill_color: s.active_fill_color.clone(),
                fill_opacity: s.active_fill_opacity,
            }
        } else {
            BoundaryStyle {
                color: s.stroke_color.clone(),
                weight: s.weight,
                fill_color: s.fill_color.clone(),
                fill_opacity: s.fill_opacity,
            }
        }
    }

    /// Style while the pointer is over a polygon; leaving restores `style_for`.
    pub fn hover_style(&self, index: usize, active_zone: Option<ZoneId>) -> BoundaryStyle {
        BoundaryStyle {
            fill_opacity: self.style.hover_fill_opacity,
            ..self.style_for(index, active_zone)
        }
    }

    /// Styles for every feature, in feature order. Empty in degraded mode.
    pub fn styles(&self, active_zone: Option<ZoneId>) -> Vec<ZoneStyleUpdate> {
        let count = self.boundaries().map_or(0, ZoneBoundaries::len);
        (0..count)
            .map(|index| ZoneStyleUpdate {
                index,
                style: self.style_for(index, active_zone),
            })
            .collect()
    }

    /// Drawable zone layer; `None` in degraded mode.
    pub fn layer(&self, active_zone: Option<ZoneId>) -> Option<ZoneLayer> {
        let boundaries = self.boundaries()?;
        Some(ZoneLayer {
            geojson: boundaries.to_geojson_value(),
            tooltips: (0..boundaries.len()).map(|i| self.tooltip(i)).collect(),
            styles: (0..boundaries.len())
                .map(|i| self.style_for(i, active_zone))
                .collect(),
        })
    }

    /// Hover label for a feature; `None` for unlabeled features.
    pub fn tooltip(&self, index: usize) -> Option<String> {
        self.feature_zone(index).map(ZoneId::label)
    }

    /// Toggles the clicked zone as the active zone.
    ///
    /// Features without a zone, unknown indices and degraded mode leave
    /// `filters` untouched and return `None`.
    pub fn click(&self, index: usize, filters: &mut FilterState) -> Option<ZoneClick> {
        let feature = self.boundaries()?.feature(index)?;
        let Some(zone) = feature.zone else {
            debug!(index, "click on unlabeled zone feature ignored");
            return None;
        };
        let active_zone = filters.set_active_zone(Some(zone));
        Some(ZoneClick {
            zone,
            active_zone,
            bounds: feature.bounds,
        })
    }
}
