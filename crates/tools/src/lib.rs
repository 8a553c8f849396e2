//! Headless front end for the `citymap` command.

use std::fmt::Write as _;
use std::path::Path;

use catalog::{Catalog, CategoryRegistry, JsonCatalogSource};
use explorer::{
    Browser, BrowserConfig, DetailPanel, Gallery, ListView, MapSurface, Marker, PlaceDetail,
    PlaceList, ZoneLayer, ZoneStyleUpdate,
};
use formats::BoundaryLoad;
use foundation::{GeoBounds, LatLng, ZoneId};

/// Collaborator that keeps the last rendered state instead of drawing it.
#[derive(Debug, Default)]
pub struct TextUi {
    pub view: Option<(LatLng, u8)>,
    pub markers: Vec<Marker>,
    pub list: Option<ListView>,
    pub detail: Option<PlaceDetail>,
}

impl MapSurface for TextUi {
    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.view = Some((center, zoom));
    }

    fn fit_bounds(&mut self, bounds: GeoBounds, _padding_px: u32) {
        self.view = Some((bounds.center(), self.view.map_or(12, |(_, z)| z)));
    }

    fn show_markers(&mut self, markers: &[Marker]) {
        self.markers = markers.to_vec();
    }

    fn draw_zones(&mut self, _layer: &ZoneLayer) {}

    fn style_zones(&mut self, _styles: &[ZoneStyleUpdate]) {}
}

impl DetailPanel for TextUi {
    fn show(&mut self, detail: &PlaceDetail) {
        self.detail = Some(detail.clone());
    }

    fn hide(&mut self) {
        self.detail = None;
    }
}

impl PlaceList for TextUi {
    fn render(&mut self, view: &ListView) {
        self.list = Some(view.clone());
    }
}

/// Filter flags shared by `query` and `show`.
#[derive(Debug, Default, Clone)]
pub struct FilterArgs {
    /// Boundary-click zone; wins over `zones`.
    pub zone: Option<u8>,
    pub zones: Vec<u8>,
    pub categories: Vec<String>,
    pub search: Option<String>,
}

pub fn load_config(path: Option<&Path>) -> Result<BrowserConfig, String> {
    let Some(path) = path else {
        return Ok(BrowserConfig::default());
    };
    let raw = std::fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))?;
    BrowserConfig::from_json_str(&raw).map_err(|e| format!("parse config {path:?}: {e}"))
}

pub fn load_catalog(path: &Path) -> Result<Catalog, String> {
    Catalog::load(&JsonCatalogSource::from_path(path)).map_err(|e| e.to_string())
}

fn zone_arg(n: u8) -> Result<ZoneId, String> {
    ZoneId::new(i64::from(n)).ok_or_else(|| format!("zone out of range (1-20): {n}"))
}

pub fn open_browser(
    catalog: Catalog,
    config: BrowserConfig,
    args: &FilterArgs,
) -> Result<Browser<TextUi>, String> {
    let mut browser = Browser::new(catalog, CategoryRegistry::builtin(), config, TextUi::default());

    if !args.zones.is_empty() {
        let zones = args
            .zones
            .iter()
            .map(|&z| zone_arg(z))
            .collect::<Result<Vec<_>, _>>()?;
        browser.set_selected_zones(zones);
    }
    if let Some(z) = args.zone {
        browser.set_active_zone(Some(zone_arg(z)?));
    }
    for category in &args.categories {
        if !browser.filters().active_categories().contains(category) {
            browser.toggle_category(category);
        }
    }
    if let Some(text) = &args.search {
        browser.set_search_text(text.as_str());
    }
    Ok(browser)
}

pub fn render_list(view: &ListView) -> String {
    let entries = match view {
        ListView::Empty(msg) => return format!("{msg}\n"),
        ListView::Entries(entries) => entries,
    };

    let mut out = String::new();
    for e in entries {
        let mut meta = vec![e.zone_badge.clone()];
        meta.extend(e.price_note.clone());
        meta.extend(e.cuisines.clone());
        let _ = writeln!(out, "{} {}  [{}]  ({})", e.icon, e.name, meta.join(" | "), e.id);
    }
    out
}

pub fn render_detail(d: &PlaceDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", d.icon, d.name);
    let mut sub = vec![d.category_label.clone(), d.zone_badge.clone()];
    sub.extend(d.price_note.clone());
    let _ = writeln!(out, "{}", sub.join(" · "));
    let _ = writeln!(out, "Adresse: {}", d.address);
    if let Some(hours) = &d.opening_hours_note {
        let _ = writeln!(out, "Horaires: {hours}");
    }
    if let Some(desc) = &d.description {
        let _ = writeln!(out, "\n{desc}");
    }
    if !d.chips.is_empty() {
        let _ = writeln!(out, "\n#{}", d.chips.join(" #"));
    }
    for link in &d.links {
        let _ = writeln!(out, "{} {}: {}", link.icon, link.label, link.url);
    }
    match &d.gallery {
        Gallery::Photos(images) => {
            for src in images {
                let _ = writeln!(out, "photo: {src}");
            }
        }
        Gallery::Empty(msg) => {
            let _ = writeln!(out, "{msg}");
        }
    }
    out
}

pub fn describe_zones(load: &BoundaryLoad) -> String {
    let boundaries = match load {
        BoundaryLoad::Unavailable(reason) => {
            return format!("zone overlay unavailable: {reason}\n");
        }
        BoundaryLoad::Loaded(b) => b,
    };

    let mut out = String::new();
    for (index, f) in boundaries.features.iter().enumerate() {
        let zone = f
            .zone
            .map_or_else(|| "unlabeled".to_string(), ZoneId::label);
        let extent = f.bounds.map_or_else(
            || "no extent".to_string(),
            |b| {
                format!(
                    "{:.4},{:.4} .. {:.4},{:.4}",
                    b.south_west.lat, b.south_west.lng, b.north_east.lat, b.north_east.lng
                )
            },
        );
        let _ = writeln!(out, "#{index}: {zone}  {extent}");
    }
    out
}

pub fn render_facets(catalog: &Catalog, registry: &CategoryRegistry) -> String {
    let mut out = String::from("categories:\n");
    for id in catalog.categories_present() {
        let style = registry.resolve(&id);
        let _ = writeln!(out, "  {} {} ({id})", style.icon, style.label);
    }
    out.push_str("cuisines:\n");
    for c in catalog.cuisines_present() {
        let _ = writeln!(out, "  {c}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{FilterArgs, describe_zones, open_browser, render_detail, render_list};
    use catalog::{Catalog, JsonCatalogSource};
    use explorer::BrowserConfig;
    use formats::BoundaryLoad;
    use pretty_assertions::assert_eq;

    fn bundled() -> Catalog {
        Catalog::load(&JsonCatalogSource::inline(include_str!(
            "../../../data/places.json"
        )))
        .expect("catalog")
    }

    #[test]
    fn query_applies_every_flag() {
        let args = FilterArgs {
            zone: None,
            zones: vec![1, 2],
            categories: vec!["comedy_club".to_string()],
            search: Some("stand-up".to_string()),
        };
        let browser = open_browser(bundled(), BrowserConfig::default(), &args).expect("browser");
        let ids: Vec<&str> = browser.filtered().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["the-fridge-comedy-club", "marco-polo-comedy-club"]);

        let text = render_list(browser.ui().list.as_ref().expect("list"));
        assert!(text.contains("The Fridge Comedy Club"));
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn zone_flag_wins_over_zone_list() {
        let args = FilterArgs {
            zone: Some(18),
            zones: vec![1, 2],
            ..Default::default()
        };
        let browser = open_browser(bundled(), BrowserConfig::default(), &args).expect("browser");
        assert!(browser.filters().selected_zones().is_empty());
        assert_eq!(browser.filtered().len(), 1);
    }

    #[test]
    fn out_of_range_zone_is_rejected() {
        let args = FilterArgs {
            zone: Some(21),
            ..Default::default()
        };
        assert!(open_browser(bundled(), BrowserConfig::default(), &args).is_err());
    }

    #[test]
    fn empty_result_prints_message() {
        let args = FilterArgs {
            search: Some("no-such-place".to_string()),
            ..Default::default()
        };
        let browser = open_browser(bundled(), BrowserConfig::default(), &args).expect("browser");
        let text = render_list(browser.ui().list.as_ref().expect("list"));
        assert_eq!(text, "Aucun lieu trouvé avec ces filtres.\n");
    }

    #[test]
    fn show_renders_selected_detail() {
        let mut browser =
            open_browser(bundled(), BrowserConfig::default(), &FilterArgs::default()).expect("browser");
        assert!(browser.select_place("the-joke-comedy-club"));
        let detail = browser.ui().detail.clone().expect("detail");
        let text = render_detail(&detail);
        assert!(text.starts_with("🎤 The Joke Comedy Club\n"));
        assert!(text.contains("Comedy club · 4ᵉ · ≈ 15€ / personne"));
        assert!(text.contains("🌐 Site: https://thejoke.fr/"));
        assert!(text.contains("Aucune photo pour le moment."));
    }

    #[test]
    fn zones_listing_marks_unlabeled_features() {
        let load = BoundaryLoad::from_geojson_str(include_str!(
            "../../../data/fixtures/zones.geojson"
        ));
        let text = describe_zones(&load);
        assert_eq!(text.lines().count(), 5);
        assert!(text.lines().nth(3).is_some_and(|l| l.starts_with("#3: 11ᵉ")));
        assert!(text.lines().nth(4).is_some_and(|l| l.contains("unlabeled")));

        let degraded = describe_zones(&BoundaryLoad::unavailable("missing"));
        assert!(degraded.starts_with("zone overlay unavailable"));
    }
}
