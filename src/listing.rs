//! Initial filter state of the listings page, seeded from the query
//! parameters the assistant puts in its link.
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingFilters {
    pub search: String,
    pub category: String,
    pub location: String,
    pub price_range: (u64, u64),
    pub experience_years: u32,
}

impl ListingFilters {
    /// Unfiltered state with the price slider spanning `0..=max_price`.
    pub fn unfiltered(max_price: u64) -> Self {
        Self {
            search: String::new(),
            category: ALL_CATEGORIES.to_string(),
            location: String::new(),
            price_range: (0, max_price),
            experience_years: 0,
        }
    }

    /// Read `category`, `location`, `minPrice` and `maxPrice` from a URL query
    /// string (with or without the leading `?`). Missing or unreadable values
    /// keep their unfiltered default.
    pub fn from_query(query: &str, max_price: u64) -> Self {
        let mut filters = Self::unfiltered(max_price);
        let query = query.strip_prefix('?').unwrap_or(query);

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            match &*key {
                "category" => filters.category = value.into_owned(),
                "location" => filters.location = value.into_owned(),
                "minPrice" => {
                    if let Some(min) = leading_integer(&value) {
                        filters.price_range.0 = min;
                    }
                }
                "maxPrice" => {
                    if let Some(max) = leading_integer(&value) {
                        filters.price_range.1 = max;
                    }
                }
                _ => log::debug!("ignoring query parameter {key}"),
            }
        }

        filters
    }

    pub fn is_active(&self, max_price: u64) -> bool {
        !self.search.is_empty()
            || self.category != ALL_CATEGORIES
            || !self.location.is_empty()
            || self.price_range.0 > 0
            || self.price_range.1 < max_price
            || self.experience_years > 0
    }
}

/// Digits at the start of `value` (after leading whitespace), "120abc" -> 120.
fn leading_integer(value: &str) -> Option<u64> {
    let value = value.trim_start();
    let end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());

    value[..end].parse().ok()
}
