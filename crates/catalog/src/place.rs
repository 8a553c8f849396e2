use foundation::{LatLng, ZoneId};
use serde::{Deserialize, Deserializer, Serialize};

/// Named external links attached to a place.
///
/// The static data uses empty strings for "no link"; accessors treat those as absent.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceLinks {
    pub website: Option<String>,
    pub maps: Option<String>,
    pub instagram: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub other: Vec<String>,
}

impl PlaceLinks {
    pub fn website(&self) -> Option<&str> {
        non_empty(&self.website)
    }

    pub fn maps(&self) -> Option<&str> {
        non_empty(&self.maps)
    }

    pub fn instagram(&self) -> Option<&str> {
        non_empty(&self.instagram)
    }
}

/// One point of interest. Immutable once it is in a [`crate::Catalog`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cuisines: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    /// Kept as read; only `1..=20` takes part in zone filtering.
    #[serde(alias = "arrondissement")]
    pub zone: i64,
    #[serde(rename = "lat", alias = "latitude")]
    pub latitude: f64,
    #[serde(rename = "lng", alias = "longitude")]
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours_note: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: PlaceLinks,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<String>,
}

impl Place {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    /// `None` when the record carries a zone outside `1..=20`.
    pub fn zone_id(&self) -> Option<ZoneId> {
        ZoneId::new(self.zone)
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(&self.description)
    }

    pub fn price_note(&self) -> Option<&str> {
        non_empty(&self.price_note)
    }

    pub fn opening_hours_note(&self) -> Option<&str> {
        non_empty(&self.opening_hours_note)
    }

    /// Lowercased text searched by the free-text filter:
    /// name, tags, cuisines, description and address joined by spaces.
    pub fn search_haystack(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(3 + self.tags.len() + self.cuisines.len());
        parts.push(&self.name);
        parts.extend(self.tags.iter().map(String::as_str));
        parts.extend(self.cuisines.iter().map(String::as_str));
        parts.push(self.description.as_deref().unwrap_or(""));
        parts.push(&self.address);
        parts.join(" ").to_lowercase()
    }
}

/// `null` reads like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}
