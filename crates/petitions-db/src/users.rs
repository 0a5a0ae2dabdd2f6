use rusqlite::{Connection, OptionalExtension};

use crate::error::is_unique_violation;
use crate::models::UserRow;
use crate::{Database, DbError, Result};

impl Database {
    /// Insert a user. `password_hash` must already be a PHC hash string.
    pub fn create_user(&self, username: &str, password_hash: &str) -> Result<UserRow> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (username, password) VALUES (?1, ?2)",
                (username, password_hash),
            )
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DbError::UsernameTaken(username.to_string())
                } else {
                    e.into()
                }
            })?;

            Ok(UserRow {
                id: conn.last_insert_rowid(),
                username: username.to_string(),
                password: password_hash.to_string(),
            })
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "username = ?1", username))
    }

    pub fn get_user_by_id(&self, id: i64) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "id = ?1", id))
    }
}

fn query_user<P: rusqlite::ToSql>(conn: &Connection, filter: &str, value: P) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, username, password FROM users WHERE {filter}"
    ))?;

    let row = stmt.query_row([value], UserRow::from_row).optional()?;
    Ok(row)
}
