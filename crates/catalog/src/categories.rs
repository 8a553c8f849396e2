use serde::{Deserialize, Serialize};

/// Display metadata for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStyle {
    pub label: String,
    pub icon: String,
    pub color: String,
}

impl CategoryStyle {
    pub fn new(label: impl Into<String>, icon: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            icon: icon.into(),
            color: color.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    pub id: String,
    pub style: CategoryStyle,
}

/// Category id -> display metadata, total over all ids.
///
/// Unknown ids resolve to the default entry with the raw id as label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRegistry {
    entries: Vec<CategoryEntry>,
    default_icon: String,
    default_color: String,
}

pub const DEFAULT_CATEGORY_ICON: &str = "📍";
pub const DEFAULT_CATEGORY_COLOR: &str = "#64748b";

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            default_icon: DEFAULT_CATEGORY_ICON.to_string(),
            default_color: DEFAULT_CATEGORY_COLOR.to_string(),
        }
    }
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The seven built-in categories, in legend order.
    pub fn builtin() -> Self {
        let mut r = Self::new();
        r.register("restaurant", CategoryStyle::new("Restaurant", "🍽️", "#ef4444"));
        r.register("glacier", CategoryStyle::new("Glacier", "🍦", "#38bdf8"));
        r.register("dessert", CategoryStyle::new("Dessert", "🍪", "#fb7185"));
        r.register("bar", CategoryStyle::new("Bar", "🍸", "#a78bfa"));
        r.register("comedy_club", CategoryStyle::new("Comedy club", "🎤", "#f59e0b"));
        r.register("exposition", CategoryStyle::new("Exposition", "🖼️", "#22c55e"));
        r.register("arcade", CategoryStyle::new("Arcade", "🎮", "#60a5fa"));
        r
    }

    /// Adds or replaces an entry. Replacing keeps the original legend position.
    pub fn register(&mut self, id: impl Into<String>, style: CategoryStyle) {
        let id = id.into();
        if let Some(existing) = self.entries.iter_mut().find(|e| e.id == id) {
            existing.style = style;
            return;
        }
        self.entries.push(CategoryEntry { id, style });
    }

    pub fn resolve(&self, id: &str) -> CategoryStyle {
        match self.entries.iter().find(|e| e.id == id) {
            Some(entry) => entry.style.clone(),
            None => CategoryStyle::new(id, &self.default_icon, &self.default_color),
        }
    }

    pub fn entries(&self) -> &[CategoryEntry] {
        &self.entries
    }
}
