use serde::{Deserialize, Serialize};

/// A catalogued book. `isbn` is treated as the business key, but nothing
/// enforces uniqueness at write time; delete works on every match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub author: String,
}
