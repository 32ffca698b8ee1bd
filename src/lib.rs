pub mod assistant;
pub mod cli;
pub mod config;
pub mod errors;
pub mod listing;
pub mod search_query;
pub mod web;
