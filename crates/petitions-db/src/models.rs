//! Database row types. These map directly to SQLite rows and are converted
//! into `petitions_types::models` at the edge of this crate.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use petitions_types::models::{Petition, User, Vote};
use rusqlite::Row;
use tracing::warn;

#[derive(Debug)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password: String,
}

#[derive(Debug)]
pub struct PetitionRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub votes_count: i64,
    pub created_at: String,
}

#[derive(Debug)]
pub struct VoteRow {
    pub id: i64,
    pub user_id: i64,
    pub petition_id: i64,
    pub created_at: String,
}

impl UserRow {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            username: row.get(1)?,
            password: row.get(2)?,
        })
    }

    pub fn into_model(self) -> User {
        User {
            id: self.id,
            username: self.username,
        }
    }
}

impl PetitionRow {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            votes_count: row.get(3)?,
            created_at: row.get(4)?,
        })
    }

    pub fn into_model(self) -> Petition {
        let created_at = parse_timestamp(&self.created_at, "petition", self.id);
        Petition {
            id: self.id,
            title: self.title,
            description: self.description,
            votes_count: self.votes_count,
            created_at,
        }
    }
}

impl VoteRow {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            petition_id: row.get(2)?,
            created_at: row.get(3)?,
        })
    }

    pub fn into_model(self) -> Vote {
        let created_at = parse_timestamp(&self.created_at, "vote", self.id);
        Vote {
            id: self.id,
            user_id: self.user_id,
            petition_id: self.petition_id,
            created_at,
        }
    }
}

/// Timestamps are written as fixed-width RFC 3339 so that text ordering in
/// SQL matches chronological ordering.
pub(crate) fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str, kind: &str, id: i64) -> DateTime<Utc> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            // Rows written by SQLite's datetime('now') carry no timezone.
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt created_at '{}' on {} {}: {}", raw, kind, id, e);
            DateTime::default()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_roundtrip_and_sort_as_text() {
        let earlier = "2026-01-02T03:04:05.000001Z";
        let later = "2026-01-02T03:04:05.100000Z";
        assert!(earlier < later);
        assert!(parse_timestamp(earlier, "petition", 1) < parse_timestamp(later, "petition", 2));
    }

    #[test]
    fn sqlite_datetime_format_is_accepted() {
        let parsed = parse_timestamp("2026-01-02 03:04:05", "vote", 1);
        assert_eq!(parsed.to_rfc3339(), "2026-01-02T03:04:05+00:00");
    }

    #[test]
    fn corrupt_timestamp_falls_back_to_epoch() {
        assert_eq!(parse_timestamp("yesterday", "vote", 1), DateTime::<Utc>::default());
    }
}
