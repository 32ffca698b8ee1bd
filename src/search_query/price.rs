use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// How the "k" thousands shorthand is detected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KScaling {
    /// Scale when the letter `k` appears anywhere in the query.
    /// An unrelated word such as "looking" scales the price too.
    #[default]
    Global,
    /// Scale only when a `k` suffix follows a number of the matched phrase.
    Scoped,
}

/// Which bound(s) a price rule writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceBound {
    Max,
    Min,
    Range,
}

#[derive(Debug)]
pub struct PriceRule {
    pub bound: PriceBound,
    pub triggers: &'static [&'static str],
}

/// Evaluated in order, every rule runs. A later match overwrites the bounds
/// written by an earlier one.
pub const PRICE_RULES: &[PriceRule] = &[
    PriceRule {
        bound: PriceBound::Max,
        triggers: &["under", "less than", "below", "max", "maximum"],
    },
    PriceRule {
        bound: PriceBound::Min,
        triggers: &["over", "more than", "above", "min", "minimum"],
    },
    PriceRule {
        bound: PriceBound::Range,
        triggers: &["between"],
    },
];

// ASCII digit run, optional comma, optional second ASCII digit run
const NUMBER: &str = r"([0-9]+),?([0-9]+)?";
const GLOBAL_SUFFIX: &str = r"\s*(k)?";
const SCOPED_SUFFIX: &str = r"(?:\s*(k)(?-u:\b))?";
const RANGE_CONNECTOR: &str = r"(?:\s*(?:and|to|-)\s*)";

struct CompiledRule {
    bound: PriceBound,
    regex: Regex,
}

static GLOBAL_RULES: Lazy<Vec<CompiledRule>> = Lazy::new(|| compile_rules(GLOBAL_SUFFIX));
static SCOPED_RULES: Lazy<Vec<CompiledRule>> = Lazy::new(|| compile_rules(SCOPED_SUFFIX));

fn compile_rules(suffix: &str) -> Vec<CompiledRule> {
    PRICE_RULES
        .iter()
        .map(|rule| {
            let triggers = rule
                .triggers
                .iter()
                .map(|t| regex::escape(t))
                .collect::<Vec<_>>()
                .join("|");

            let pattern = match rule.bound {
                PriceBound::Max | PriceBound::Min => {
                    format!(r"(?-u:\b)(?:{triggers})\s+{NUMBER}{suffix}")
                }
                PriceBound::Range => format!(
                    r"(?-u:\b)(?:{triggers})\s+{NUMBER}{suffix}{RANGE_CONNECTOR}{NUMBER}{suffix}"
                ),
            };

            CompiledRule {
                bound: rule.bound,
                regex: Regex::new(&pattern).expect("valid price regex"),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceSlots {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

/// Run all price rules over a lower-cased query.
pub fn extract_prices(lower: &str, scaling: KScaling) -> PriceSlots {
    let rules = match scaling {
        KScaling::Global => &*GLOBAL_RULES,
        KScaling::Scoped => &*SCOPED_RULES,
    };

    let mut slots = PriceSlots::default();

    for rule in rules {
        let Some(caps) = rule.regex.captures(lower) else {
            continue;
        };

        match rule.bound {
            PriceBound::Max => {
                let scale = is_scaled(lower, scaling, &caps, &[3]);
                if let Some(value) = read_number(&caps, 1, scale) {
                    slots.max = Some(value);
                }
            }
            PriceBound::Min => {
                let scale = is_scaled(lower, scaling, &caps, &[3]);
                if let Some(value) = read_number(&caps, 1, scale) {
                    slots.min = Some(value);
                }
            }
            PriceBound::Range => {
                let scale = is_scaled(lower, scaling, &caps, &[3, 6]);
                if let (Some(low), Some(high)) =
                    (read_number(&caps, 1, scale), read_number(&caps, 4, scale))
                {
                    slots.min = Some(low);
                    slots.max = Some(high);
                }
            }
        }
    }

    slots
}

fn is_scaled(lower: &str, scaling: KScaling, caps: &Captures, suffix_groups: &[usize]) -> bool {
    match scaling {
        KScaling::Global => lower.contains('k'),
        KScaling::Scoped => suffix_groups.iter().any(|&idx| caps.get(idx).is_some()),
    }
}

/// Read the number whose first digit run is capture group `first`, merging the
/// following group when present. Values that do not fit in `u64` are absent.
fn read_number(caps: &Captures, first: usize, scale: bool) -> Option<u64> {
    let head = caps.get(first)?.as_str();
    let tail = caps.get(first + 1).map(|m| m.as_str()).unwrap_or_default();

    let value = merge_digits(head, tail)?;

    if scale {
        value.checked_mul(1000)
    } else {
        Some(value)
    }
}

fn merge_digits(head: &str, tail: &str) -> Option<u64> {
    let mut digits = String::with_capacity(head.len() + tail.len());
    digits.push_str(head);
    digits.push_str(tail);
    digits.parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global(q: &str) -> PriceSlots {
        extract_prices(q, KScaling::Global)
    }

    fn scoped(q: &str) -> PriceSlots {
        extract_prices(q, KScaling::Scoped)
    }

    #[test]
    fn test_merge_digits() {
        assert_eq!(merge_digits("50", "000"), Some(50000));
        assert_eq!(merge_digits("50", ""), Some(50));
        assert_eq!(merge_digits("99999999999999999999", ""), None);
    }

    #[test]
    fn test_under_triggers() {
        for trigger in ["under", "less than", "below", "max", "maximum"] {
            let slots = global(&format!("venue {trigger} 300"));
            assert_eq!(slots.max, Some(300), "trigger {trigger}");
            assert_eq!(slots.min, None);
        }
    }

    #[test]
    fn test_over_triggers() {
        for trigger in ["over", "more than", "above", "min", "minimum"] {
            let slots = global(&format!("venue {trigger} 300"));
            assert_eq!(slots.min, Some(300), "trigger {trigger}");
            assert_eq!(slots.max, None);
        }
    }

    #[test]
    fn test_between_connectors() {
        for connector in [" and ", " to ", "-", " - "] {
            let slots = global(&format!("between 100{connector}200"));
            assert_eq!(slots.min, Some(100), "connector {connector:?}");
            assert_eq!(slots.max, Some(200), "connector {connector:?}");
        }
    }

    #[test]
    fn test_under_and_over_combine() {
        let slots = global("over 100 and under 900");
        assert_eq!(slots, PriceSlots { min: Some(100), max: Some(900) });
    }

    #[test]
    fn test_comma_separated_thousands() {
        assert_eq!(global("under 50,000").max, Some(50000));
    }

    #[test]
    fn test_only_two_digit_groups_are_merged() {
        assert_eq!(global("under 1,000,000").max, Some(1000));
    }

    #[test]
    fn test_space_is_not_a_separator() {
        assert_eq!(global("under 50 000").max, Some(50));
    }

    #[test]
    fn test_decimal_part_is_dropped() {
        assert_eq!(global("under 2.5k").max, Some(2000));
    }

    #[test]
    fn test_overflow_is_absent() {
        assert_eq!(global("under 99999999999999999999").max, None);
        // fits in u64 but not after scaling
        assert_eq!(global("under 18446744073709552k").max, None);
    }

    #[test]
    fn test_range_overflow_writes_neither_bound() {
        let slots = global("under 500 between 1 and 99999999999999999999");
        assert_eq!(slots, PriceSlots { min: None, max: Some(500) });
    }

    #[test]
    fn test_non_ascii_digits_are_skipped() {
        // U+096B DEVANAGARI DIGIT FIVE is not a price digit
        assert_eq!(global("under \u{096B} or under 500").max, Some(500));
        assert_eq!(global("over \u{0665}\u{0660} or over 20").min, Some(20));
        assert_eq!(global("under \u{096B}").max, None);
    }

    #[test]
    fn test_trigger_after_non_ascii_letter() {
        // word boundaries are ASCII: "é" does not join with "under"
        assert_eq!(global("caféunder 500").max, Some(500));
    }

    #[test]
    fn test_global_k_anywhere_in_query() {
        assert_eq!(global("looking for a caterer under 500").max, Some(500000));
    }

    #[test]
    fn test_scoped_k_requires_suffix() {
        assert_eq!(scoped("looking for a caterer under 500").max, Some(500));
        assert_eq!(scoped("caterer under 50k").max, Some(50000));
        assert_eq!(scoped("caterer under 50 k").max, Some(50000));
        assert_eq!(scoped("caterer under 50 kids").max, Some(50));
    }

    #[test]
    fn test_scoped_range_suffix_scales_both() {
        let slots = scoped("between 10 and 30k");
        assert_eq!(slots, PriceSlots { min: Some(10000), max: Some(30000) });
    }
}
