/// Geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        LatLng { lat, lng }
    }
}

/// Axis-aligned lat/lng box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeoBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl GeoBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        GeoBounds {
            south_west,
            north_east,
        }
    }

    /// Returns `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = LatLng>) -> Option<Self> {
        let mut it = points.into_iter();
        let first = it.next()?;
        let mut b = GeoBounds::new(first, first);
        for p in it {
            b.extend(p);
        }
        Some(b)
    }

    pub fn extend(&mut self, p: LatLng) {
        self.south_west.lat = self.south_west.lat.min(p.lat);
        self.south_west.lng = self.south_west.lng.min(p.lng);
        self.north_east.lat = self.north_east.lat.max(p.lat);
        self.north_east.lng = self.north_east.lng.max(p.lng);
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) * 0.5,
            (self.south_west.lng + self.north_east.lng) * 0.5,
        )
    }

    pub fn contains(&self, p: LatLng) -> bool {
        p.lat >= self.south_west.lat
            && p.lat <= self.north_east.lat
            && p.lng >= self.south_west.lng
            && p.lng <= self.north_east.lng
    }
}

#[cfg(test)]
mod tests {
    use super::{GeoBounds, LatLng};

    #[test]
    fn from_points_covers_all_inputs() {
        let b = GeoBounds::from_points([
            LatLng::new(48.85, 2.35),
            LatLng::new(48.87, 2.33),
            LatLng::new(48.86, 2.38),
        ])
        .expect("non-empty");
        assert_eq!(b.south_west, LatLng::new(48.85, 2.33));
        assert_eq!(b.north_east, LatLng::new(48.87, 2.38));
        assert!(b.contains(LatLng::new(48.86, 2.35)));
        assert!(!b.contains(LatLng::new(48.90, 2.35)));
    }

    #[test]
    fn empty_points_have_no_bounds() {
        assert!(GeoBounds::from_points(Vec::new()).is_none());
    }

    #[test]
    fn center_is_midpoint() {
        let b = GeoBounds::new(LatLng::new(0.0, 0.0), LatLng::new(2.0, 4.0));
        assert_eq!(b.center(), LatLng::new(1.0, 2.0));
    }
}
