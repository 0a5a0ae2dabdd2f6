use serde::{Deserialize, Serialize};

// -- JWT Claims --

/// Claims carried by an access token. `sub` is the user id rendered as a
/// decimal string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

// -- Users --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
}

// -- Petitions --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePetitionRequest {
    pub title: String,
    pub description: String,
}

pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const MAX_PAGE_LIMIT: u32 = 100;
pub const MAX_SEARCH_LEN: usize = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    CreatedAt,
    VotesCount,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Deserialize)]
pub struct ListPetitionsQuery {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    pub search: Option<String>,
    #[serde(default)]
    pub sort_by: SortBy,
    #[serde(default)]
    pub sort_order: SortOrder,
}

fn default_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

/// How the `search` parameter of a petition listing filters results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PetitionSearch {
    /// Exact match on the petition id.
    Id(i64),
    /// Case-insensitive substring match on the title.
    Title(String),
}

impl PetitionSearch {
    /// Returns `None` for a blank search term.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse::<i64>() {
            Ok(id) => Some(Self::Id(id)),
            Err(_) => Some(Self::Title(raw.to_string())),
        }
    }
}

// -- Votes --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CastVoteRequest {
    pub petition_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct RetractVoteQuery {
    pub petition_id: i64,
}

// -- Errors --

/// Body of every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
