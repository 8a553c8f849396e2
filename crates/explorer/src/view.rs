//! Render-ready models handed to the collaborators.

use catalog::{CategoryRegistry, Place};
use foundation::ZoneId;
use serde::Serialize;

use crate::config::BrowserConfig;
use crate::filter::FilterState;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub icon: String,
    pub color: String,
    pub title: String,
}

impl Marker {
    pub fn for_place(place: &Place, registry: &CategoryRegistry) -> Self {
        let style = registry.resolve(&place.category);
        Self {
            id: place.id.clone(),
            lat: place.latitude,
            lng: place.longitude,
            icon: style.icon,
            color: style.color,
            title: place.name.clone(),
        }
    }
}

fn zone_badge(place: &Place) -> String {
    format!("{}ᵉ", place.zone)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListEntry {
    pub id: String,
    pub icon: String,
    pub name: String,
    pub zone_badge: String,
    pub price_note: Option<String>,
    pub cuisines: Option<String>,
}

impl ListEntry {
    pub fn for_place(place: &Place, registry: &CategoryRegistry) -> Self {
        Self {
            id: place.id.clone(),
            icon: registry.resolve(&place.category).icon,
            name: place.name.clone(),
            zone_badge: zone_badge(place),
            price_note: place.price_note().map(str::to_string),
            cuisines: (!place.cuisines.is_empty()).then(|| place.cuisines.join(", ")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ListView {
    Entries(Vec<ListEntry>),
    Empty(String),
}

impl ListView {
    pub fn build(places: &[&Place], registry: &CategoryRegistry, config: &BrowserConfig) -> Self {
        if places.is_empty() {
            return ListView::Empty(config.empty_list_message.clone());
        }
        ListView::Entries(
            places
                .iter()
                .map(|p| ListEntry::for_place(p, registry))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailLink {
    pub label: String,
    pub icon: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Gallery {
    Photos(Vec<String>),
    /// Explicit placeholder text when the place has no images.
    Empty(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceDetail {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub category_label: String,
    pub zone_badge: String,
    pub price_note: Option<String>,
    pub address: String,
    pub opening_hours_note: Option<String>,
    pub description: Option<String>,
    /// Cuisines first, then tags.
    pub chips: Vec<String>,
    pub links: Vec<DetailLink>,
    pub gallery: Gallery,
}

impl PlaceDetail {
    pub fn build(place: &Place, registry: &CategoryRegistry, config: &BrowserConfig) -> Self {
        let style = registry.resolve(&place.category);

        let mut links = Vec::new();
        for (label, icon, url) in [
            ("Site", "🌐", place.links.website()),
            ("Maps", "📍", place.links.maps()),
            ("Instagram", "📸", place.links.instagram()),
        ] {
            if let Some(url) = url {
                links.push(DetailLink {
                    label: label.to_string(),
                    icon: icon.to_string(),
                    url: url.to_string(),
                });
            }
        }

        let images: Vec<String> = place
            .images
            .iter()
            .filter(|src| !src.trim().is_empty())
            .cloned()
            .collect();
        let gallery = if images.is_empty() {
            Gallery::Empty(config.no_photos_message.clone())
        } else {
            Gallery::Photos(images)
        };

        Self {
            id: place.id.clone(),
            name: place.name.clone(),
            icon: style.icon,
            category_label: style.label,
            zone_badge: zone_badge(place),
            price_note: place.price_note().map(str::to_string),
            address: place.address.clone(),
            opening_hours_note: place.opening_hours_note().map(str::to_string),
            description: place.description().map(str::to_string),
            chips: place
                .cuisines
                .iter()
                .chain(place.tags.iter())
                .cloned()
                .collect(),
            links,
            gallery,
        }
    }
}

/// One clickable entry of the category legend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendItem {
    pub category: String,
    pub label: String,
    pub icon: String,
    pub color: String,
    pub active: bool,
}

impl LegendItem {
    pub fn build_all(registry: &CategoryRegistry, filters: &FilterState) -> Vec<Self> {
        registry
            .entries()
            .iter()
            .map(|e| LegendItem {
                category: e.id.clone(),
                label: e.style.label.clone(),
                icon: e.style.icon.clone(),
                color: e.style.color.clone(),
                active: filters.active_categories().contains(&e.id),
            })
            .collect()
    }
}

/// One option of the multi-choice zone control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneOption {
    pub zone: u8,
    pub label: String,
    pub selected: bool,
}

impl ZoneOption {
    pub fn build_all(filters: &FilterState) -> Vec<Self> {
        ZoneId::all()
            .map(|z| ZoneOption {
                zone: z.get(),
                label: z.label(),
                selected: filters.selected_zones().contains(&z),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundaryStyle {
    pub color: String,
    pub weight: f32,
    pub fill_color: String,
    pub fill_opacity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneStyleUpdate {
    pub index: usize,
    pub style: BoundaryStyle,
}

/// Zone polygons as the map surface draws them. `tooltips` and `styles`
/// are indexed like the features of `geojson`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneLayer {
    pub geojson: serde_json::Value,
    pub tooltips: Vec<Option<String>>,
    pub styles: Vec<BoundaryStyle>,
}

#[cfg(test)]
mod tests {
    use super::{Gallery, ListView, PlaceDetail, ZoneOption};
    use crate::config::BrowserConfig;
    use crate::filter::FilterState;
    use crate::test_support::{bundled_catalog, place};
    use catalog::CategoryRegistry;
    use foundation::ZoneId;
    use pretty_assertions::assert_eq;

    #[test]
    fn detail_lists_only_present_links_and_placeholder_gallery() {
        let catalog = bundled_catalog();
        let noodle = catalog.get("noodle-inn-opera").expect("noodle inn");
        let detail =
            PlaceDetail::build(noodle, &CategoryRegistry::builtin(), &BrowserConfig::default());

        let labels: Vec<&str> = detail.links.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["Maps", "Instagram"]);
        assert_eq!(detail.category_label, "Restaurant");
        assert_eq!(detail.zone_badge, "2ᵉ");
        assert_eq!(detail.chips, vec!["chinoise", "nouilles", "raviolis"]);
        assert_eq!(
            detail.gallery,
            Gallery::Empty("Aucune photo pour le moment.".to_string())
        );
    }

    #[test]
    fn detail_for_unknown_category_uses_default_metadata() {
        let mut p = place("x", "cinema", 5);
        p.images = vec!["https://img/1.jpg".to_string()];
        let detail = PlaceDetail::build(&p, &CategoryRegistry::builtin(), &BrowserConfig::default());
        assert_eq!(detail.icon, "📍");
        assert_eq!(detail.category_label, "cinema");
        assert_eq!(detail.gallery, Gallery::Photos(vec!["https://img/1.jpg".to_string()]));
    }

    #[test]
    fn empty_result_renders_message() {
        let view = ListView::build(&[], &CategoryRegistry::builtin(), &BrowserConfig::default());
        assert!(matches!(view, ListView::Empty(ref msg) if msg.contains("Aucun lieu")));
    }

    #[test]
    fn list_entries_join_cuisines() {
        let catalog = bundled_catalog();
        let wok = catalog.get("le-wok-saint-germain").expect("wok");
        let view = ListView::build(&[wok], &CategoryRegistry::builtin(), &BrowserConfig::default());
        let ListView::Entries(entries) = view else {
            panic!("expected entries");
        };
        assert_eq!(entries[0].cuisines.as_deref(), Some("thaï, asiatique"));
        assert_eq!(entries[0].icon, "🍽️");
    }

    #[test]
    fn zone_options_reflect_selection() {
        let mut filters = FilterState::new();
        filters.set_selected_zones([ZoneId::new(3).expect("zone")]);
        let options = ZoneOption::build_all(&filters);
        assert_eq!(options.len(), 20);
        assert!(options[2].selected);
        assert_eq!(options[2].label, "3ᵉ");
        assert!(!options[0].selected);
    }
}
