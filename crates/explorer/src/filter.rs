use std::collections::BTreeSet;

use foundation::ZoneId;
use tracing::debug;

/// User-chosen restriction over the catalog.
///
/// Zone precedence: `active_zone` (boundary click) wins over `selected_zones`
/// (multi-choice control). Each zone mutator clears the other field so that
/// inspecting either one for display never shows a stale restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    active_zone: Option<ZoneId>,
    selected_zones: BTreeSet<ZoneId>,
    active_categories: BTreeSet<String>,
    search_text: String,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_zone(&self) -> Option<ZoneId> {
        self.active_zone
    }

    pub fn selected_zones(&self) -> &BTreeSet<ZoneId> {
        &self.selected_zones
    }

    pub fn active_categories(&self) -> &BTreeSet<String> {
        &self.active_categories
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Trimmed, lowercased search text; `None` when it is blank.
    pub fn search_needle(&self) -> Option<String> {
        let trimmed = self.search_text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
    }

    pub fn is_unrestricted(&self) -> bool {
        self.active_zone.is_none()
            && self.selected_zones.is_empty()
            && self.active_categories.is_empty()
            && self.search_needle().is_none()
    }

    /// Stored verbatim; trimming happens at match time.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    /// Adds `category` if absent, removes it if present.
    ///
    /// Returns `true` if the category is active afterwards.
    pub fn toggle_category(&mut self, category: &str) -> bool {
        let active = if self.active_categories.remove(category) {
            false
        } else {
            self.active_categories.insert(category.to_string());
            true
        };
        debug!(category, active, "category toggled");
        active
    }

    /// Replaces the multi-choice zone set and drops any boundary-click zone.
    pub fn set_selected_zones(&mut self, zones: impl IntoIterator<Item = ZoneId>) {
        self.selected_zones = zones.into_iter().collect();
        self.active_zone = None;
        debug!(zones = ?self.selected_zones, "selected zones replaced");
    }

    /// Boundary-click zone with toggle semantics: the zone already active is
    /// cleared, any other zone replaces it. Always empties `selected_zones`.
    ///
    /// Returns the active zone afterwards.
    pub fn set_active_zone(&mut self, zone: Option<ZoneId>) -> Option<ZoneId> {
        self.active_zone = match zone {
            Some(z) if self.active_zone == Some(z) => None,
            other => other,
        };
        self.selected_zones.clear();
        debug!(active_zone = ?self.active_zone, "active zone set");
        self.active_zone
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::FilterState;
    use foundation::ZoneId;
    use pretty_assertions::assert_eq;

    fn z(n: i64) -> ZoneId {
        ZoneId::new(n).expect("valid zone")
    }

    #[test]
    fn toggle_category_twice_restores_state() {
        let mut s = FilterState::new();
        s.toggle_category("bar");
        let before = s.clone();

        assert!(s.toggle_category("glacier"));
        assert!(!s.toggle_category("glacier"));
        assert_eq!(s, before);
    }

    #[test]
    fn unknown_category_toggle_is_accepted() {
        let mut s = FilterState::new();
        assert!(s.toggle_category("not-a-category"));
        assert!(s.active_categories().contains("not-a-category"));
    }

    #[test]
    fn active_zone_clears_selected_zones() {
        let mut s = FilterState::new();
        s.set_selected_zones([z(1), z(2)]);
        s.set_active_zone(Some(z(5)));
        assert_eq!(s.active_zone(), Some(z(5)));
        assert!(s.selected_zones().is_empty());
    }

    #[test]
    fn selected_zones_clear_active_zone() {
        let mut s = FilterState::new();
        s.set_active_zone(Some(z(5)));
        s.set_selected_zones([z(1), z(2)]);
        assert_eq!(s.active_zone(), None);
        assert_eq!(s.selected_zones().len(), 2);
    }

    #[test]
    fn active_zone_toggles_off_and_replaces() {
        let mut s = FilterState::new();
        assert_eq!(s.set_active_zone(Some(z(5))), Some(z(5)));
        assert_eq!(s.set_active_zone(Some(z(5))), None);
        s.set_active_zone(Some(z(5)));
        assert_eq!(s.set_active_zone(Some(z(7))), Some(z(7)));
        assert_eq!(s.set_active_zone(None), None);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut s = FilterState::new();
        s.set_search_text("comedy");
        s.toggle_category("bar");
        s.set_active_zone(Some(z(3)));
        s.reset();
        assert_eq!(s, FilterState::new());
        assert!(s.is_unrestricted());
    }

    #[test]
    fn search_text_is_stored_verbatim_and_trimmed_on_read() {
        let mut s = FilterState::new();
        s.set_search_text("  Comedy ");
        assert_eq!(s.search_text(), "  Comedy ");
        assert_eq!(s.search_needle().as_deref(), Some("comedy"));

        s.set_search_text(" \t ");
        assert_eq!(s.search_needle(), None);
    }
}
