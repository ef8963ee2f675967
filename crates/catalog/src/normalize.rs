// ABOUTME: Resistor value canonicalizer producing short engineering notation (10R, 2R5, 3k3).
// ABOUTME: Keeps only the first fractional digit; extra precision is truncated on purpose.

/// Resistance unit glyph stripped before parsing.
const OHM: char = 'Ω';

/// Converts a scraped resistance string into canonical short-form notation.
///
/// - `"10Ω"` -> `"10R"`, `"2.5Ω"` -> `"2R5"`
/// - `"10kΩ"` -> `"10k"`, `"3.3kΩ"` -> `"3k3"`
/// - `""` -> `""`
///
/// Only the first digit after the decimal point survives (`"4.75kΩ"` ->
/// `"4k7"`). A decimal point with no digits after it yields `0`
/// (`"3.k"` -> `"3k0"`). Prefixes other than kilo are not recognized and go
/// through the plain-ohm branch.
pub fn normalize_resistance(raw: &str) -> String {
    let value: String = raw.chars().filter(|c| *c != OHM).collect();
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }

    if value.to_lowercase().contains('k') {
        let stripped = strip_redundant_r(value).to_lowercase();
        let numeric = stripped.split('k').next().unwrap_or("").trim();
        match split_fraction(numeric) {
            Some((int_part, digit)) => format!("{}k{}", int_part, digit),
            None => format!("{}k", numeric),
        }
    } else {
        let stripped = strip_redundant_r(value);
        let numeric = stripped.trim();
        match split_fraction(numeric) {
            Some((int_part, digit)) => format!("{}R{}", int_part, digit),
            None => format!("{}R", numeric),
        }
    }
}

/// Removes `R`/`r` letters that merely restate the unit.
fn strip_redundant_r(value: &str) -> String {
    value.chars().filter(|c| !matches!(c, 'R' | 'r')).collect()
}

/// Splits `"3.3"` into `("3", '3')`; returns `None` when there is no decimal point.
fn split_fraction(numeric: &str) -> Option<(&str, char)> {
    let (int_part, frac) = numeric.split_once('.')?;
    Some((int_part, frac.chars().next().unwrap_or('0')))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ohm_values() {
        assert_eq!(normalize_resistance("10Ω"), "10R");
        assert_eq!(normalize_resistance("2.5Ω"), "2R5");
        assert_eq!(normalize_resistance("0Ω"), "0R");
    }

    #[test]
    fn kilohm_values() {
        assert_eq!(normalize_resistance("3.3kΩ"), "3k3");
        assert_eq!(normalize_resistance("10kΩ"), "10k");
        assert_eq!(normalize_resistance("4.7K"), "4k7");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(normalize_resistance(""), "");
        assert_eq!(normalize_resistance("Ω"), "");
    }

    #[test]
    fn extra_precision_is_truncated() {
        assert_eq!(normalize_resistance("4.75kΩ"), "4k7");
        assert_eq!(normalize_resistance("1.24Ω"), "1R2");
    }

    #[test]
    fn redundant_r_and_spacing_are_stripped() {
        assert_eq!(normalize_resistance("10R"), "10R");
        assert_eq!(normalize_resistance("2.2kR"), "2k2");
        assert_eq!(normalize_resistance("100 Ω"), "100R");
    }

    #[test]
    fn dangling_decimal_point_uses_zero() {
        assert_eq!(normalize_resistance("3.k"), "3k0");
        assert_eq!(normalize_resistance("5."), "5R0");
    }

    #[test]
    fn normalizing_twice_is_stable_for_plain_ohms() {
        let once = normalize_resistance("47Ω");
        assert_eq!(normalize_resistance(&once), once);
    }
}
