use serde::{Deserialize, Serialize};

pub type ResourceID = i64;

pub const ALL_CATEGORIES: &str = "All";
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub id: ResourceID,
    pub name: String,
    pub description: String,
    pub url: String,
    pub category: String,
    pub rating: u8,
}

/// Ratings arrive as any JSON integer and are range-checked before they
/// are narrowed, so an out-of-range star count is ignored rather than
/// rejected by the body parser.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct NewResource {
    pub name: String,
    pub description: String,
    pub url: String,
    pub category: String,
    pub rating: i64,
}

#[derive(Deserialize, Debug)]
pub struct RateRequest {
    pub rating: i64,
}
