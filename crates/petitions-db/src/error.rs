use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("username '{0}' is already taken")]
    UsernameTaken(String),

    #[error("petition {0} not found")]
    PetitionNotFound(i64),

    #[error("user {user_id} has already voted for petition {petition_id}")]
    AlreadyVoted { user_id: i64, petition_id: i64 },

    #[error("no vote from user {user_id} for petition {petition_id}")]
    VoteNotFound { user_id: i64, petition_id: i64 },

    #[error("database lock poisoned")]
    LockPoisoned,

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, DbError>;

pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
