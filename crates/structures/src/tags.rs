//! Typed read access over free-form tags.
//!
//! All string parsing of tag values happens here. Callers get `Option`s and
//! apply their own defaults.

use footprint::Tags;

use crate::constants::FEET_TO_METRES;

#[derive(Debug, Clone, Copy)]
pub struct TagView<'a> {
    tags: &'a Tags,
}

impl<'a> TagView<'a> {
    pub fn new(tags: &'a Tags) -> Self {
        Self { tags }
    }

    /// Trimmed value; blank values count as absent.
    pub fn str(&self, key: &str) -> Option<&'a str> {
        self.tags
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// First present key in `keys`.
    pub fn first_str(&self, keys: &[&str]) -> Option<&'a str> {
        keys.iter().find_map(|k| self.str(k))
    }

    pub fn has(&self, key: &str) -> bool {
        self.str(key).is_some()
    }

    pub fn is(&self, key: &str, value: &str) -> bool {
        self.str(key).is_some_and(|v| v.eq_ignore_ascii_case(value))
    }

    /// Present and not `no`.
    pub fn is_set(&self, key: &str) -> bool {
        self.str(key).is_some_and(|v| !v.eq_ignore_ascii_case("no"))
    }

    /// `yes`, `true` or `1`.
    pub fn flag(&self, key: &str) -> bool {
        self.str(key)
            .is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "yes" | "true" | "1"))
    }

    /// Numeric value in metres (feet are converted).
    pub fn number(&self, key: &str) -> Option<f64> {
        self.str(key).and_then(parse_number)
    }

    pub fn first_number(&self, keys: &[&str]) -> Option<f64> {
        keys.iter().find_map(|k| self.number(k))
    }

    /// Numeric value rounded to the nearest integer.
    pub fn int(&self, key: &str) -> Option<i32> {
        self.number(key).map(|n| n.round() as i32)
    }

    pub fn first_int(&self, keys: &[&str]) -> Option<i32> {
        keys.iter().find_map(|k| self.int(k))
    }

    pub fn tags(&self) -> &'a Tags {
        self.tags
    }
}

/// Parse a numeric tag value.
///
/// Accepts `12`, `12.5`, `12,5`, `12 m`, `12m`, `40'` / `40 ft` (feet,
/// returned in metres) and takes the first entry of a `;` list.
pub fn parse_number(raw: &str) -> Option<f64> {
    let first = raw.split(';').next()?.trim();
    let lower = first.to_ascii_lowercase();

    let (body, scale) = if let Some(rest) = lower.strip_suffix('\'') {
        (rest, FEET_TO_METRES)
    } else if let Some(rest) = lower.strip_suffix("ft") {
        (rest, FEET_TO_METRES)
    } else if let Some(rest) = lower
        .strip_suffix("metres")
        .or_else(|| lower.strip_suffix("meters"))
        .or_else(|| lower.strip_suffix('m'))
    {
        (rest, 1.0)
    } else {
        (lower.as_str(), 1.0)
    };

    let value: f64 = body.trim().replace(',', ".").parse().ok()?;
    value.is_finite().then_some(value * scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use footprint::tags_from;

    #[test]
    fn test_parse_number_formats() {
        assert_eq!(parse_number("12"), Some(12.0));
        assert_eq!(parse_number("12.5"), Some(12.5));
        assert_eq!(parse_number("12,5"), Some(12.5));
        assert_eq!(parse_number("12 m"), Some(12.0));
        assert_eq!(parse_number("12m"), Some(12.0));
        assert_eq!(parse_number("7 meters"), Some(7.0));
        assert_eq!(parse_number(" 3;5 "), Some(3.0));
        assert_eq!(parse_number("-1"), Some(-1.0));
        let feet = parse_number("40'").expect("feet");
        assert!((feet - 12.192).abs() < 1e-9);
        let feet = parse_number("10 ft").expect("feet");
        assert!((feet - 3.048).abs() < 1e-9);
    }

    #[test]
    fn test_parse_number_rejects_garbage() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("tall"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn test_view_accessors() {
        let tags = tags_from([
            ("building", "yes"),
            ("building:levels", "4"),
            ("min_height", " "),
            ("bridge", "yes"),
            ("layer", "no"),
            ("roof:levels", "1.6"),
        ]);
        let view = TagView::new(&tags);
        assert_eq!(view.int("building:levels"), Some(4));
        assert_eq!(view.int("roof:levels"), Some(2));
        assert!(!view.has("min_height"));
        assert!(view.flag("bridge"));
        assert!(!view.is_set("layer"));
        assert!(view.is("building", "YES"));
        assert_eq!(view.first_int(&["levels", "building:levels"]), Some(4));
        assert_eq!(view.first_str(&["missing", "building"]), Some("yes"));
    }
}
