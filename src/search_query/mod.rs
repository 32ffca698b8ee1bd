//! Slot extraction from free-text service requests.
//!
//! A query such as "I need a caterer in Ahmedabad under 50000" is reduced to
//! a category, a location and a price range. Every slot is optional and the
//! interpreter never fails: a slot that cannot be found is left out.
//!
//! Ordering rules:
//! - category: the first term of [`LEXICON`] contained in the query wins
//! - location: the first "in"/"at"/"from" phrase wins
//! - price: under, over, then between; between overwrites both bounds
mod lexicon;
mod location;
mod price;

use serde::{Deserialize, Serialize};

pub use lexicon::{Category, LEXICON};
pub use price::{KScaling, PriceBound, PriceRule, PRICE_RULES};

/// Structured filters extracted from a query. `query` always echoes the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedFilters {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<u64>,
}

impl ParsedFilters {
    /// True when at least one slot was extracted.
    pub fn has_slots(&self) -> bool {
        self.category.is_some()
            || self.location.is_some()
            || self.min_price.is_some()
            || self.max_price.is_some()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interpreter {
    pub k_scaling: KScaling,
}

impl Interpreter {
    pub fn new(k_scaling: KScaling) -> Self {
        Self { k_scaling }
    }

    pub fn parse(&self, text: &str) -> ParsedFilters {
        let lower = text.to_lowercase();
        let prices = price::extract_prices(&lower, self.k_scaling);

        let filters = ParsedFilters {
            query: text.to_string(),
            category: lexicon::match_category(&lower),
            location: location::extract_location(&lower),
            min_price: prices.min,
            max_price: prices.max,
        };

        log::trace!(
            "parsed query: category={:?} location={:?} min={:?} max={:?}",
            filters.category,
            filters.location,
            filters.min_price,
            filters.max_price
        );

        filters
    }
}

/// Parse with the default interpreter (global "k" detection).
pub fn parse(text: &str) -> ParsedFilters {
    Interpreter::default().parse(text)
}
