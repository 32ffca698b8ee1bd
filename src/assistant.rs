//! Conversational front-end over the query interpreter.
//!
//! Turns a parsed request into a confirmation sentence and a link to the
//! listings page carrying the extracted filters as query parameters.
use serde::Serialize;
use url::form_urlencoded;

use crate::search_query::{Interpreter, ParsedFilters};

pub const LISTINGS_PATH: &str = "/businesses";

pub const GREETING: &str = "Hello! I can help you find event services. Try asking me something like \"Find a caterer in Mumbai under 50000\" or \"I need a photographer in Delhi\".";

pub const NOT_UNDERSTOOD: &str = "I'm not sure I understood what you're looking for. Could you try being more specific? For example, try asking for 'photographers in Mumbai' or 'caterer under 50000 in Delhi'.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reply {
    Search {
        message: String,
        filters: ParsedFilters,
        link: String,
    },
    NotUnderstood {
        message: String,
    },
}

impl Reply {
    pub fn message(&self) -> &str {
        match self {
            Reply::Search { message, .. } => message,
            Reply::NotUnderstood { message } => message,
        }
    }
}

/// Answer a user message. Blank input gets no reply at all.
pub fn respond(text: &str, interpreter: &Interpreter) -> Option<Reply> {
    if text.trim().is_empty() {
        return None;
    }

    let filters = interpreter.parse(text);

    if !filters.has_slots() {
        log::debug!("no slots found in {text:?}");
        return Some(Reply::NotUnderstood {
            message: NOT_UNDERSTOOD.to_string(),
        });
    }

    Some(Reply::Search {
        message: confirmation(&filters),
        link: listings_link(&filters),
        filters,
    })
}

fn confirmation(filters: &ParsedFilters) -> String {
    let mut parts = vec!["I'll look for".to_string()];

    match &filters.category {
        Some(category) => parts.push(format!("{category} services")),
        None => parts.push("all services".to_string()),
    }

    if let Some(location) = &filters.location {
        parts.push(format!("in {location}"));
    }

    match (filters.min_price, filters.max_price) {
        (Some(min), Some(max)) => parts.push(format!("with prices between ₹{min} and ₹{max}")),
        (Some(min), None) => parts.push(format!("with prices above ₹{min}")),
        (None, Some(max)) => parts.push(format!("with prices under ₹{max}")),
        (None, None) => {}
    }

    format!(
        "{}. Redirecting you to the search results page.",
        parts.join(" ")
    )
}

/// Form-encode the present slots as `category`, `location`, `minPrice`,
/// `maxPrice`, in that order.
pub fn query_params(filters: &ParsedFilters) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    if let Some(category) = &filters.category {
        serializer.append_pair("category", category.as_str());
    }
    if let Some(location) = &filters.location {
        serializer.append_pair("location", location);
    }
    if let Some(min) = filters.min_price {
        serializer.append_pair("minPrice", &min.to_string());
    }
    if let Some(max) = filters.max_price {
        serializer.append_pair("maxPrice", &max.to_string());
    }

    serializer.finish()
}

pub fn listings_link(filters: &ParsedFilters) -> String {
    format!("{LISTINGS_PATH}?{}", query_params(filters))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search_query::KScaling;

    fn ask(text: &str) -> Option<Reply> {
        respond(text, &Interpreter::default())
    }

    #[test]
    fn test_blank_input_gets_no_reply() {
        assert_eq!(ask(""), None);
        assert_eq!(ask("  \n "), None);
    }

    #[test]
    fn test_not_understood() {
        let reply = ask("hello there").unwrap();
        assert_eq!(
            reply,
            Reply::NotUnderstood {
                message: NOT_UNDERSTOOD.to_string()
            }
        );
    }

    #[test]
    fn test_caterer_under_price() {
        let reply = ask("I need a caterer in Ahmedabad under 50000").unwrap();
        assert_eq!(
            reply.message(),
            "I'll look for Catering services in Ahmedabad with prices under ₹50000. Redirecting you to the search results page."
        );
        match reply {
            Reply::Search { link, .. } => assert_eq!(
                link,
                "/businesses?category=Catering&location=Ahmedabad&maxPrice=50000"
            ),
            other => panic!("unexpected reply {other:?}"),
        }
    }

    #[test]
    fn test_range_message_and_link() {
        let reply = ask("Show me decorators between 10000 and 30000 in Delhi").unwrap();
        assert_eq!(
            reply.message(),
            "I'll look for Decoration services in Delhi with prices between ₹10000 and ₹30000. Redirecting you to the search results page."
        );
        match reply {
            Reply::Search { link, .. } => assert_eq!(
                link,
                "/businesses?category=Decoration&location=Delhi&minPrice=10000&maxPrice=30000"
            ),
            other => panic!("unexpected reply {other:?}"),
        }
    }

    #[test]
    fn test_without_category() {
        let reply = ask("anything above 2000").unwrap();
        assert_eq!(
            reply.message(),
            "I'll look for all services with prices above ₹2000. Redirecting you to the search results page."
        );
    }

    #[test]
    fn test_category_with_space_is_encoded() {
        let filters = Interpreter::default().parse("event planner");
        assert_eq!(query_params(&filters), "category=Event+Management");
    }

    #[test]
    fn test_scoped_interpreter_is_used() {
        let reply = respond("looking for a dj under 500", &Interpreter::new(KScaling::Scoped)).unwrap();
        assert!(reply.message().ends_with("with prices under ₹500. Redirecting you to the search results page."));
    }

    #[test]
    fn test_reply_json_shape() {
        let reply = ask("venue in goa").unwrap();
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["kind"], "search");
        assert_eq!(json["filters"]["location"], "Goa");
        assert_eq!(json["link"], "/businesses?category=Venue&location=Goa");
    }
}
