use serde::{Deserialize, Serialize};

/// A single catalog record as served by the upstream listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub name: String,
    pub author: String,
    pub units_sold: u64,
    pub price: u64,
}
