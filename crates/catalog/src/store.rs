use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::{CatalogError, Place};

/// Where the static place list comes from.
pub trait CatalogSource {
    fn load(&self) -> Result<Vec<Place>, CatalogError>;
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalogSource {
    places: Vec<Place>,
}

impl InMemoryCatalogSource {
    pub fn new(places: Vec<Place>) -> Self {
        Self { places }
    }
}

impl CatalogSource for InMemoryCatalogSource {
    fn load(&self) -> Result<Vec<Place>, CatalogError> {
        Ok(self.places.clone())
    }
}

/// A JSON array of place records, either inline or read from disk on `load`.
#[derive(Debug, Clone)]
pub enum JsonCatalogSource {
    Inline(String),
    File(PathBuf),
}

impl JsonCatalogSource {
    pub fn inline(payload: impl Into<String>) -> Self {
        JsonCatalogSource::Inline(payload.into())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Self {
        JsonCatalogSource::File(path.as_ref().to_path_buf())
    }
}

impl CatalogSource for JsonCatalogSource {
    fn load(&self) -> Result<Vec<Place>, CatalogError> {
        match self {
            JsonCatalogSource::Inline(payload) => parse_places(payload),
            JsonCatalogSource::File(path) => {
                let payload = std::fs::read_to_string(path)
                    .map_err(|e| CatalogError::Io(format!("read {path:?}: {e}")))?;
                parse_places(&payload)
            }
        }
    }
}

/// The payload must be a JSON array. Records that do not decode as a place
/// are skipped with a warning; the rest still load.
fn parse_places(payload: &str) -> Result<Vec<Place>, CatalogError> {
    if payload.trim().is_empty() {
        return Ok(Vec::new());
    }
    let records: Vec<Value> =
        serde_json::from_str(payload).map_err(|e| CatalogError::Corrupt(e.to_string()))?;

    let mut places = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Place>(record) {
            Ok(place) => places.push(place),
            Err(err) => warn!(index, %err, "skipping malformed place record"),
        }
    }
    Ok(places)
}

/// Ordered, append-only collection of places with an id index.
///
/// Ordering contract:
/// - Iteration yields places in load/append order. Nothing re-sorts the catalog.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    places: Vec<Place>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_places(places: Vec<Place>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for place in places {
            catalog.append(place)?;
        }
        Ok(catalog)
    }

    pub fn load(source: &dyn CatalogSource) -> Result<Self, CatalogError> {
        let catalog = Self::from_places(source.load()?)?;
        debug!(places = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Appends one place at the end of the catalog.
    ///
    /// Fails without modifying the catalog if the id is already present.
    pub fn append(&mut self, place: Place) -> Result<(), CatalogError> {
        if self.index.contains_key(&place.id) {
            return Err(CatalogError::DuplicateId(place.id));
        }
        if place.zone_id().is_none() {
            warn!(id = %place.id, zone = place.zone, "place zone out of range, zone filters skip it");
        }
        self.index.insert(place.id.clone(), self.places.len());
        self.places.push(place);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Place> {
        self.index.get(id).map(|&i| &self.places[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Place> + '_ {
        self.places.iter()
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Distinct categories used by at least one place, sorted case-insensitively.
    pub fn categories_present(&self) -> Vec<String> {
        uniq_sorted(self.places.iter().map(|p| p.category.as_str()))
    }

    /// Distinct cuisines across all places, sorted case-insensitively.
    pub fn cuisines_present(&self) -> Vec<String> {
        uniq_sorted(
            self.places
                .iter()
                .flat_map(|p| p.cuisines.iter().map(String::as_str)),
        )
    }
}

fn uniq_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = values
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    out.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    out.dedup();
    out
}
