/// Administrative zone number.
///
/// Only values in `1..=20` can be constructed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZoneId(u8);

impl ZoneId {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 20;

    pub fn new(n: i64) -> Option<Self> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&n) {
            Some(Self(n as u8))
        } else {
            None
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// All zones in ascending order.
    pub fn all() -> impl Iterator<Item = ZoneId> {
        (Self::MIN..=Self::MAX).map(ZoneId)
    }

    /// Ordinal badge shown on chips, tooltips and select options.
    pub fn label(self) -> String {
        format!("{}ᵉ", self.0)
    }
}

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::ZoneId;

    #[test]
    fn rejects_out_of_range() {
        assert!(ZoneId::new(0).is_none());
        assert!(ZoneId::new(21).is_none());
        assert!(ZoneId::new(-3).is_none());
        assert_eq!(ZoneId::new(20).map(ZoneId::get), Some(20));
    }

    #[test]
    fn all_is_ordered_and_complete() {
        let got: Vec<u8> = ZoneId::all().map(ZoneId::get).collect();
        assert_eq!(got, (1..=20).collect::<Vec<u8>>());
    }

    #[test]
    fn label_uses_ordinal_suffix() {
        assert_eq!(ZoneId::new(11).map(ZoneId::label).as_deref(), Some("11ᵉ"));
    }
}
