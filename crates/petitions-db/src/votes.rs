//! Vote casting and retraction.
//!
//! Each operation touches both the `votes` row and the owning petition's
//! `votes_count` inside one immediate transaction, so the counter always
//! equals the number of vote rows. `UNIQUE(user_id, petition_id)` rejects a
//! duplicate cast even if the existence check were skipped.

use rusqlite::OptionalExtension;
use tracing::info;

use crate::error::is_unique_violation;
use crate::models::{VoteRow, now_timestamp};
use crate::{Database, DbError, Result};

impl Database {
    pub fn cast_vote(&self, user_id: i64, petition_id: i64) -> Result<VoteRow> {
        let created_at = now_timestamp();

        let row = self.with_tx(|tx| {
            let petition_exists = tx
                .query_row("SELECT 1 FROM petitions WHERE id = ?1", [petition_id], |_| Ok(()))
                .optional()?
                .is_some();
            if !petition_exists {
                return Err(DbError::PetitionNotFound(petition_id));
            }

            tx.execute(
                "INSERT INTO votes (user_id, petition_id, created_at) VALUES (?1, ?2, ?3)",
                (user_id, petition_id, &created_at),
            )
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DbError::AlreadyVoted { user_id, petition_id }
                } else {
                    e.into()
                }
            })?;
            let id = tx.last_insert_rowid();

            tx.execute(
                "UPDATE petitions SET votes_count = votes_count + 1 WHERE id = ?1",
                [petition_id],
            )?;

            Ok(VoteRow {
                id,
                user_id,
                petition_id,
                created_at,
            })
        })?;

        info!("User {} voted for petition {}", user_id, petition_id);
        Ok(row)
    }

    /// Delete the caller's vote and return the deleted row.
    pub fn retract_vote(&self, user_id: i64, petition_id: i64) -> Result<VoteRow> {
        let row = self.with_tx(|tx| {
            let vote = tx
                .query_row(
                    "SELECT id, user_id, petition_id, created_at FROM votes
                     WHERE user_id = ?1 AND petition_id = ?2",
                    [user_id, petition_id],
                    VoteRow::from_row,
                )
                .optional()?
                .ok_or(DbError::VoteNotFound { user_id, petition_id })?;

            tx.execute("DELETE FROM votes WHERE id = ?1", [vote.id])?;
            tx.execute(
                "UPDATE petitions SET votes_count = votes_count - 1 WHERE id = ?1",
                [petition_id],
            )?;

            Ok(vote)
        })?;

        info!("User {} retracted vote for petition {}", user_id, petition_id);
        Ok(row)
    }
}

#[cfg(test)]
impl Database {
    /// Count vote rows for a petition. This is the source of truth that
    /// `votes_count` caches.
    pub fn count_votes(&self, petition_id: i64) -> Result<i64> {
        self.with_conn(|conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM votes WHERE petition_id = ?1",
                [petition_id],
                |r| r.get(0),
            )?;
            Ok(count)
        })
    }
}
