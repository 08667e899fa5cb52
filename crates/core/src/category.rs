//! Field category keys and their default weight table.
//!
//! Category weights sum to 100 so the overall knowledge-base score is itself
//! on a 0–100 scale.

pub const IDENTITY: &str = "identity";
pub const POLICIES: &str = "policies";
pub const KNOWLEDGE: &str = "knowledge";
pub const COMMUNICATION: &str = "communication";
pub const SALES: &str = "sales";

/// Default category weights, in reporting order.
pub const DEFAULT_CATEGORY_WEIGHTS: [(&str, f64); 5] = [
    (IDENTITY, 30.0),
    (POLICIES, 25.0),
    (KNOWLEDGE, 20.0),
    (COMMUNICATION, 15.0),
    (SALES, 10.0),
];
