// ABOUTME: Ordered, data-driven regex rule tables that recover attributes from free text.
// ABOUTME: find_first() tries each family's rules in order and renders the first match.

//! Free-text attribute extraction.
//!
//! Each attribute [`Family`] owns an ordered table of [`PatternRule`]s. A rule
//! pairs a compiled regex with a [`Render`] step that turns the captures into
//! the canonical output string. Rules are tried in declaration order and the
//! first successful match wins; conflicting later matches are never
//! consulted.
//!
//! Absence is the normal outcome for descriptions that do not mention an
//! attribute and is reported as `None`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Attribute families with a free-text fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Capacitance,
    Voltage,
    Tolerance,
    TemperatureCoefficient,
    Resistance,
    Power,
}

/// How the captures of a matching rule become the output value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Render {
    /// Group 1 followed by group 2 uppercased: `100nF` -> `100NF`.
    NumberUnitUpper,
    /// Group 1 followed by group 2 as written: `100mW` -> `100mW`.
    NumberUnit,
    /// Group 1 wrapped in a fixed prefix and suffix: `± 5 %` -> `±5%`.
    Wrap {
        prefix: &'static str,
        suffix: &'static str,
    },
    /// Group 1 uppercased.
    Upper,
    /// Group 1 verbatim.
    Verbatim,
    /// Group 1 with all whitespace removed.
    Compact,
    /// Group 1, optional multiplier group 2, then `Ω`: `4.7 k ohm` -> `4.7kΩ`.
    Ohms,
}

impl Render {
    fn apply(self, caps: &Captures<'_>) -> Option<String> {
        let g1 = caps.get(1)?.as_str();
        let out = match self {
            Render::NumberUnitUpper => {
                format!("{}{}", g1, caps.get(2)?.as_str().to_uppercase())
            }
            Render::NumberUnit => format!("{}{}", g1, caps.get(2)?.as_str()),
            Render::Wrap { prefix, suffix } => format!("{}{}{}", prefix, g1, suffix),
            Render::Upper => g1.to_uppercase(),
            Render::Verbatim => g1.to_string(),
            Render::Compact => g1.split_whitespace().collect(),
            Render::Ohms => format!(
                "{}{}Ω",
                g1,
                caps.get(2).map(|m| m.as_str()).unwrap_or_default()
            ),
        };
        Some(out)
    }
}

/// One entry of a family's rule table.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub regex: Regex,
    pub render: Render,
}

impl PatternRule {
    fn new(pattern: &str, render: Render) -> Self {
        Self {
            regex: Regex::new(pattern).expect("static pattern must compile"),
            render,
        }
    }

    /// Applies this rule to `text`, returning the rendered first match.
    pub fn apply(&self, text: &str) -> Option<String> {
        let caps = self.regex.captures(text)?;
        self.render.apply(&caps)
    }
}

static CAPACITANCE: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![
        PatternRule::new(
            r"(?i)(\d+(?:\.\d+)?)\s*(pF|nF|µF|uF|mF|F)\s",
            Render::NumberUnitUpper,
        ),
        PatternRule::new(
            r"(?i)(\d+(?:\.\d+)?)(pF|nF|µF|uF|mF|F)\s",
            Render::NumberUnitUpper,
        ),
        PatternRule::new(r"(?i)(\d+(?:\.\d+)?)\s*(pf|nf|uf|mf)\b", Render::NumberUnitUpper),
        PatternRule::new(r"(?i)(\d+(?:\.\d+)?)(pf|nf|uf|mf)\b", Render::NumberUnitUpper),
    ]
});

static VOLTAGE: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![PatternRule::new(
        r"(\d+(?:\.\d+)?)\s*V\b",
        Render::Wrap {
            prefix: "",
            suffix: "V",
        },
    )]
});

static TOLERANCE: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![PatternRule::new(
        r"±\s*(\d+(?:\.\d+)?)\s*%",
        Render::Wrap {
            prefix: "±",
            suffix: "%",
        },
    )]
});

static TEMPERATURE_COEFFICIENT: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![
        PatternRule::new(
            r"(?i)(X7R|X5R|Y5V|Z5U|X8R|X6S|X7S|X7T|X7U)",
            Render::Upper,
        ),
        PatternRule::new(r"(?i)(COG|NPO)", Render::Upper),
        PatternRule::new(r"(?i)(SL|XH|X7M)", Render::Upper),
        // Explicit operating range, kept as written.
        PatternRule::new(
            r"([+-]\d+(?:\.\d+)?°C\s*(?:to|~)\s*[+-]\d+(?:\.\d+)?°C)",
            Render::Verbatim,
        ),
    ]
});

static RESISTANCE: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![
        PatternRule::new(r"(\d+(?:\.\d+)?\s*[kKmM]?Ω)", Render::Compact),
        PatternRule::new(r"(?i)(\d+(?:\.\d+)?)\s*([km])?\s*ohms?\b", Render::Ohms),
    ]
});

static POWER: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![
        PatternRule::new(
            r"(\d+/\d+)\s*W\b",
            Render::Wrap {
                prefix: "",
                suffix: "W",
            },
        ),
        PatternRule::new(r"(\d+(?:\.\d+)?)\s*(mW|W)\b", Render::NumberUnit),
    ]
});

/// Returns the ordered rule table for `family`.
pub fn rules(family: Family) -> &'static [PatternRule] {
    match family {
        Family::Capacitance => &CAPACITANCE,
        Family::Voltage => &VOLTAGE,
        Family::Tolerance => &TOLERANCE,
        Family::TemperatureCoefficient => &TEMPERATURE_COEFFICIENT,
        Family::Resistance => &RESISTANCE,
        Family::Power => &POWER,
    }
}

/// Returns the first value any of `family`'s rules extracts from `text`.
pub fn find_first(text: &str, family: Family) -> Option<String> {
    if text.is_empty() {
        return None;
    }
    rules(family).iter().find_map(|rule| rule.apply(text))
}

/// Shorthand for [`find_first`] with [`Family::Capacitance`].
pub fn find_capacitance(text: &str) -> Option<String> {
    find_first(text, Family::Capacitance)
}
