use once_cell::sync::Lazy;
use regex::Regex;

// the lazy run stops at the first whitespace, so only one word is captured;
// the word boundary is ASCII so "é" does not count as part of a word
static LOCATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u:\b)(in|at|from)\s+([a-z\s]+?)(?:\s|$)").expect("valid location regex")
});

/// Extract the word following the first "in"/"at"/"from" in a lower-cased
/// query and capitalize its first letter. Any word is accepted.
pub fn extract_location(lower: &str) -> Option<String> {
    let captures = LOCATION_REGEX.captures(lower)?;
    let place = captures.get(2)?.as_str().trim();

    capitalize_first(place)
}

fn capitalize_first(s: &str) -> Option<String> {
    let mut chars = s.chars();
    let first = chars.next()?;

    let mut out = String::with_capacity(s.len());
    out.extend(first.to_uppercase());
    out.push_str(chars.as_str());
    Some(out)
}
