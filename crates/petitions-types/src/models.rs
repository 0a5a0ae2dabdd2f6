use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public view of a registered user. The password hash never leaves the
/// database layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Petition {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Cached count of the petition's votes.
    pub votes_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub id: i64,
    pub user_id: i64,
    pub petition_id: i64,
    pub created_at: DateTime<Utc>,
}
