use catalog::{Catalog, Place};

use crate::filter::FilterState;

/// Filter state resolved once per evaluation.
#[derive(Debug, Clone)]
pub struct PlaceQuery<'s> {
    state: &'s FilterState,
    needle: Option<String>,
}

impl<'s> PlaceQuery<'s> {
    pub fn new(state: &'s FilterState) -> Self {
        Self {
            state,
            needle: state.search_needle(),
        }
    }

    pub fn matches(&self, place: &Place) -> bool {
        zone_allows(self.state, place)
            && category_allows(self.state, place)
            && text_allows(self.needle.as_deref(), place)
    }
}

fn zone_allows(state: &FilterState, place: &Place) -> bool {
    if let Some(zone) = state.active_zone() {
        return place.zone_id() == Some(zone);
    }
    let selected = state.selected_zones();
    selected.is_empty() || place.zone_id().is_some_and(|z| selected.contains(&z))
}

fn category_allows(state: &FilterState, place: &Place) -> bool {
    let active = state.active_categories();
    // Unknown categories match on their raw id like any other.
    active.is_empty() || active.contains(&place.category)
}

fn text_allows(needle: Option<&str>, place: &Place) -> bool {
    let Some(needle) = needle else {
        return true;
    };
    place.search_haystack().contains(needle)
}

/// Places satisfying every active restriction.
///
/// Ordering contract:
/// - Output keeps catalog order; nothing is ranked or sorted.
/// - The result depends only on `catalog` and `state`.
pub fn filter_places<'a>(catalog: &'a Catalog, state: &FilterState) -> Vec<&'a Place> {
    let query = PlaceQuery::new(state);
    catalog.iter().filter(|p| query.matches(p)).collect()
}
