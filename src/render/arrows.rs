//! Built-in arrow head catalog
//!
//! Arrow heads are block references; the predefined arrows use reserved
//! block names starting with an underscore. `arrow_length` gives the
//! distance the arrow glyph occupies along the leader line, used to offset
//! the first leader vertex so the line does not pierce the glyph.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Block name of the default arrow
pub const CLOSED_FILLED: &str = "_CLOSED_FILLED";

/// Length factor per built-in arrow block name (uppercase)
///
/// The factor scales the arrow size to the occupied length along the
/// leader. Tick and oblique glyphs are drawn across the line and occupy
/// no length.
static LENGTH_FACTORS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        ("_CLOSED_FILLED", 1.0),
        ("_CLOSED_BLANK", 1.0),
        ("_CLOSED", 1.0),
        ("_OPEN", 1.0),
        ("_OPEN_30", 1.0),
        ("_OPEN_90", 1.0),
        ("_DOT", 0.5),
        ("_DOT_BLANK", 0.5),
        ("_DOT_SMALL", 0.25),
        ("_DOT_SMALL_BLANK", 0.25),
        ("_ORIGIN", 0.5),
        ("_ORIGIN2", 0.5),
        ("_BOX_FILLED", 0.5),
        ("_BOX_BLANK", 0.5),
        ("_DATUM_FILLED", 1.0),
        ("_DATUM_BLANK", 1.0),
        ("_INTEGRAL", 0.0),
        ("_ARCHTICK", 0.0),
        ("_OBLIQUE", 0.0),
        ("_NONE", 0.0),
    ])
});

/// Check whether `name` is a predefined arrow block name
pub fn is_builtin_arrow(name: &str) -> bool {
    LENGTH_FACTORS.contains_key(name.to_uppercase().as_str())
}

/// Occupied length of an arrow glyph along the leader line
///
/// Unknown (user-defined) arrow blocks report zero length because their
/// geometry is not known here.
pub fn arrow_length(block_name: &str, size: f64) -> f64 {
    LENGTH_FACTORS
        .get(block_name.to_uppercase().as_str())
        .map(|factor| factor * size)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup_is_case_insensitive() {
        assert!(is_builtin_arrow("_closed_filled"));
        assert!(is_builtin_arrow("_DOT"));
        assert!(!is_builtin_arrow("MyArrow"));
    }

    #[test]
    fn test_arrow_length() {
        assert_eq!(arrow_length(CLOSED_FILLED, 4.0), 4.0);
        assert_eq!(arrow_length("_DOT", 4.0), 2.0);
        assert_eq!(arrow_length("_NONE", 4.0), 0.0);
        // unknown blocks occupy no length
        assert_eq!(arrow_length("MyArrow", 4.0), 0.0);
    }
}
