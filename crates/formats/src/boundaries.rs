use foundation::{GeoBounds, LatLng, ZoneId};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::zone_number::zone_from_properties;

/// One zone polygon from the boundary file.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneFeature {
    pub properties: Map<String, Value>,
    /// Raw GeoJSON geometry, handed back untouched to the map surface for drawing.
    pub geometry: Value,
    /// `None` when no property yields a valid zone; such features are unclickable.
    pub zone: Option<ZoneId>,
    /// `None` when the geometry has no usable coordinates.
    pub bounds: Option<GeoBounds>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZoneBoundaries {
    pub features: Vec<ZoneFeature>,
}

#[derive(Debug)]
pub enum BoundaryError {
    Json(String),
    NotAFeatureCollection,
    InvalidFeature { index: usize, reason: String },
}

impl std::fmt::Display for BoundaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundaryError::Json(msg) => write!(f, "JSON parse error: {msg}"),
            BoundaryError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            BoundaryError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for BoundaryError {}

impl ZoneBoundaries {
    pub fn from_geojson_str(payload: &str) -> Result<Self, BoundaryError> {
        let value: Value =
            serde_json::from_str(payload).map_err(|e| BoundaryError::Json(e.to_string()))?;
        Self::from_geojson_value(value)
    }

    pub fn from_geojson_value(value: Value) -> Result<Self, BoundaryError> {
        let obj = value
            .as_object()
            .ok_or(BoundaryError::NotAFeatureCollection)?;
        let ty = obj
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or(BoundaryError::NotAFeatureCollection)?;
        if ty != "FeatureCollection" {
            return Err(BoundaryError::NotAFeatureCollection);
        }

        // A missing `features` array is read as an empty collection.
        let features_val = match obj.get("features") {
            None | Some(Value::Null) => return Ok(Self { features: Vec::new() }),
            Some(v) => v.as_array().ok_or(BoundaryError::NotAFeatureCollection)?,
        };

        let mut features = Vec::with_capacity(features_val.len());
        for (index, feat_val) in features_val.iter().enumerate() {
            let feat_obj = feat_val
                .as_object()
                .ok_or_else(|| BoundaryError::InvalidFeature {
                    index,
                    reason: "feature must be an object".to_string(),
                })?;

            let properties = feat_obj
                .get("properties")
                .and_then(|v| v.as_object())
                .cloned()
                .unwrap_or_default();
            let geometry = feat_obj.get("geometry").cloned().unwrap_or(Value::Null);

            let zone = zone_from_properties(&properties);
            if zone.is_none() {
                warn!(index, "boundary feature has no recognizable zone number");
            }

            let bounds = geometry_bounds(&geometry);
            if bounds.is_none() {
                warn!(index, "boundary feature has no usable polygon coordinates");
            }

            features.push(ZoneFeature {
                properties,
                geometry,
                zone,
                bounds,
            });
        }

        Ok(Self { features })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn feature(&self, index: usize) -> Option<&ZoneFeature> {
        self.features.get(index)
    }

    /// Emits the collection back as GeoJSON, in feature order.
    pub fn to_geojson_value(&self) -> Value {
        let features = self
            .features
            .iter()
            .map(|f| {
                let mut obj = Map::new();
                obj.insert("type".to_string(), Value::String("Feature".to_string()));
                obj.insert("properties".to_string(), Value::Object(f.properties.clone()));
                obj.insert("geometry".to_string(), f.geometry.clone());
                Value::Object(obj)
            })
            .collect();

        let mut root = Map::new();
        root.insert(
            "type".to_string(),
            Value::String("FeatureCollection".to_string()),
        );
        root.insert("features".to_string(), Value::Array(features));
        Value::Object(root)
    }
}

/// Outcome of the one-shot boundary load.
///
/// `Unavailable` is the degraded mode: the browser works without zone clicks.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryLoad {
    Loaded(ZoneBoundaries),
    Unavailable(String),
}

impl BoundaryLoad {
    pub fn from_geojson_str(payload: &str) -> Self {
        match ZoneBoundaries::from_geojson_str(payload) {
            Ok(boundaries) => Self::from_boundaries(boundaries),
            Err(err) => Self::unavailable(format!("boundary file unreadable: {err}")),
        }
    }

    pub fn from_boundaries(boundaries: ZoneBoundaries) -> Self {
        if boundaries.is_empty() {
            return Self::unavailable("boundary file has no features");
        }
        debug!(features = boundaries.len(), "zone boundaries loaded");
        BoundaryLoad::Loaded(boundaries)
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        warn!(%reason, "zone boundaries unavailable, continuing without overlay");
        BoundaryLoad::Unavailable(reason)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, BoundaryLoad::Loaded(_))
    }
}

fn geometry_bounds(geometry: &Value) -> Option<GeoBounds> {
    let obj = geometry.as_object()?;
    let coords = obj.get("coordinates")?;
    let mut points = Vec::new();
    match obj.get("type").and_then(|v| v.as_str())? {
        "Polygon" => collect_polygon(coords, &mut points),
        "MultiPolygon" => {
            for poly in coords.as_array()? {
                collect_polygon(poly, &mut points);
            }
        }
        _ => return None,
    }
    GeoBounds::from_points(points)
}

/// Collects the outer ring only; holes never widen the bounds.
fn collect_polygon(coords: &Value, out: &mut Vec<LatLng>) {
    let Some(outer) = coords.as_array().and_then(|rings| rings.first()) else {
        return;
    };
    let Some(ring) = outer.as_array() else {
        return;
    };
    for p in ring {
        let Some(pair) = p.as_array() else {
            continue;
        };
        if let (Some(lng), Some(lat)) = (
            pair.first().and_then(Value::as_f64),
            pair.get(1).and_then(Value::as_f64),
        ) {
            out.push(LatLng::new(lat, lng));
        }
    }
}
