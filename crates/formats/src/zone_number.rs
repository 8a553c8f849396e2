use foundation::ZoneId;
use serde_json::{Map, Value};

const DIRECT_KEYS: [&str; 5] = ["numero", "c_ar", "arrondissement", "code", "num"];
const INSEE_KEYS: [&str; 3] = ["c_arinsee", "insee", "code_insee"];
const NAME_KEYS: [&str; 2] = ["nom", "name"];

/// Prefix of the INSEE codes for the city's zones (`75101`..`75120`).
const INSEE_PREFIX: &str = "751";

/// Derives the zone number of a boundary feature from its properties.
///
/// Lookup order, first hit wins:
/// 1. the first present direct key (`numero`, `c_ar`, `arrondissement`, `code`, `num`),
///    as a number or numeric string;
/// 2. the first present INSEE key, containing `751NN`;
/// 3. the first present name key, containing a standalone 1-2 digit token
///    optionally suffixed with `er`, `e` or `ème` ("Paris 11e Arrondissement").
///
/// Each step only yields a value in `1..=20`; otherwise lookup falls through.
pub fn zone_from_properties(props: &Map<String, Value>) -> Option<ZoneId> {
    if let Some(zone) = first_present(props, &DIRECT_KEYS).and_then(direct_number) {
        return Some(zone);
    }

    if let Some(zone) = first_present(props, &INSEE_KEYS)
        .and_then(value_text)
        .and_then(|s| insee_number(&s))
    {
        return Some(zone);
    }

    first_present(props, &NAME_KEYS)
        .and_then(value_text)
        .and_then(|s| name_number(&s))
}

fn first_present<'a>(props: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| props.get(*k))
        .find(|v| !v.is_null())
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn direct_number(value: &Value) -> Option<ZoneId> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !n.is_finite() || n.fract() != 0.0 {
        return None;
    }
    ZoneId::new(n as i64)
}

fn insee_number(text: &str) -> Option<ZoneId> {
    let bytes = text.as_bytes();
    let mut from = 0;
    while let Some(pos) = text[from..].find(INSEE_PREFIX) {
        let start = from + pos + INSEE_PREFIX.len();
        if let Some(digits) = bytes.get(start..start + 2)
            && digits.iter().all(u8::is_ascii_digit)
        {
            let n = i64::from(digits[0] - b'0') * 10 + i64::from(digits[1] - b'0');
            return ZoneId::new(n);
        }
        from += pos + 1;
    }
    None
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn boundary_at(chars: &[char], i: usize) -> bool {
    chars.get(i).is_none_or(|c| !is_word(*c))
}

/// Finds the first standalone 1-2 digit token and returns it when it is a valid zone.
fn name_number(text: &str) -> Option<ZoneId> {
    const SUFFIXES: [&str; 3] = ["er", "e", "ème"];

    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if !chars[i].is_ascii_digit() || (i > 0 && is_word(chars[i - 1])) {
            i += 1;
            continue;
        }

        let mut end = i;
        while end < chars.len() && chars[end].is_ascii_digit() {
            end += 1;
        }
        if end - i > 2 {
            i = end;
            continue;
        }

        let suffixed = SUFFIXES.iter().any(|suffix| {
            let suffix: Vec<char> = suffix.chars().collect();
            let tail = &chars[end..];
            tail.len() >= suffix.len()
                && tail
                    .iter()
                    .zip(&suffix)
                    .all(|(a, b)| a.to_lowercase().eq(b.to_lowercase()))
                && boundary_at(&chars, end + suffix.len())
        });

        if suffixed || boundary_at(&chars, end) {
            let n = chars[i..end]
                .iter()
                .fold(0i64, |acc, c| acc * 10 + i64::from(c.to_digit(10).unwrap_or(0)));
            return ZoneId::new(n);
        }
        i = end;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::zone_from_properties;
    use serde_json::{Map, Value, json};

    fn props(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap_or_default()
    }

    fn zone(v: Value) -> Option<u8> {
        zone_from_properties(&props(v)).map(|z| z.get())
    }

    #[test]
    fn direct_keys_accept_numbers_and_numeric_strings() {
        assert_eq!(zone(json!({ "c_ar": 11 })), Some(11));
        assert_eq!(zone(json!({ "arrondissement": " 4 " })), Some(4));
        assert_eq!(zone(json!({ "num": 20.0 })), Some(20));
    }

    #[test]
    fn first_present_direct_key_wins() {
        assert_eq!(zone(json!({ "numero": 3, "c_ar": 7 })), Some(3));
        // Out-of-range direct values fall through to later strategies.
        assert_eq!(zone(json!({ "code": 75, "name": "Paris 9e" })), Some(9));
    }

    #[test]
    fn insee_codes_are_decoded() {
        assert_eq!(zone(json!({ "c_arinsee": 75118 })), Some(18));
        assert_eq!(zone(json!({ "insee": "FR-75102" })), Some(2));
        assert_eq!(zone(json!({ "code_insee": "75121" })), None);
    }

    #[test]
    fn names_with_ordinal_suffixes_are_decoded() {
        assert_eq!(zone(json!({ "nom": "Paris 11e Arrondissement" })), Some(11));
        assert_eq!(zone(json!({ "name": "1er Ardt" })), Some(1));
        assert_eq!(zone(json!({ "name": "19ème" })), Some(19));
        assert_eq!(zone(json!({ "name": "Arr. 7" })), Some(7));
    }

    #[test]
    fn malformed_identifiers_yield_none() {
        assert_eq!(zone(json!({})), None);
        assert_eq!(zone(json!({ "numero": null })), None);
        assert_eq!(zone(json!({ "numero": 11.5 })), None);
        assert_eq!(zone(json!({ "name": "Zone 75011" })), None);
        assert_eq!(zone(json!({ "name": "11eme" })), None);
        assert_eq!(zone(json!({ "name": "Quartier 42" })), None);
        assert_eq!(zone(json!({ "numero": true })), None);
    }
}
