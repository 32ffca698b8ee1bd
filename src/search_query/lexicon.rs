use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical service categories a query can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Catering,
    Photography,
    Decoration,
    Venue,
    Entertainment,
    #[serde(rename = "Event Management")]
    EventManagement,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Catering,
        Category::Photography,
        Category::Decoration,
        Category::Venue,
        Category::Entertainment,
        Category::EventManagement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Catering => "Catering",
            Category::Photography => "Photography",
            Category::Decoration => "Decoration",
            Category::Venue => "Venue",
            Category::Entertainment => "Entertainment",
            Category::EventManagement => "Event Management",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lexicon terms in match priority order. The first term contained in the
/// query wins, regardless of where it appears in the query.
pub const LEXICON: &[(&str, Category)] = &[
    ("caterer", Category::Catering),
    ("catering", Category::Catering),
    ("photographer", Category::Photography),
    ("photography", Category::Photography),
    ("decorator", Category::Decoration),
    ("decoration", Category::Decoration),
    ("venue", Category::Venue),
    ("entertainment", Category::Entertainment),
    ("music", Category::Entertainment),
    ("dj", Category::Entertainment),
    ("event manager", Category::EventManagement),
    ("event planner", Category::EventManagement),
];

/// Plain substring match against an already lower-cased query.
pub fn match_category(lower: &str) -> Option<Category> {
    LEXICON
        .iter()
        .find(|(term, _)| lower.contains(term))
        .map(|(_, category)| *category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_is_reachable() {
        for category in Category::ALL {
            assert!(
                LEXICON.iter().any(|(_, c)| *c == category),
                "{category} has no lexicon term"
            );
        }
    }

    #[test]
    fn test_lexicon_terms_are_lowercase() {
        for (term, _) in LEXICON {
            assert_eq!(*term, term.to_lowercase());
        }
    }

    #[test]
    fn test_category_serializes_to_display_name() {
        let json = serde_json::to_string(&Category::EventManagement).unwrap();
        assert_eq!(json, "\"Event Management\"");
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }

    #[test]
    fn test_substring_match_is_not_word_bounded() {
        // "dj" inside "adjust" still counts
        assert_eq!(
            match_category("can we adjust the date"),
            Some(Category::Entertainment)
        );
    }
}
