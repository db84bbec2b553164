use sqlx::error::ErrorKind;

use storefront_core::Error;

/// SQLite result code for "unable to open database file".
const SQLITE_CANTOPEN: &str = "14";

/// Translate an `sqlx` error into the core error taxonomy.
pub fn map_db_error(err: sqlx::Error) -> Error {
    match &err {
        sqlx::Error::Database(db) => match db.kind() {
            ErrorKind::ForeignKeyViolation
            | ErrorKind::UniqueViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation => Error::ConstraintViolation(db.message().to_string()),
            _ if db.code().as_deref() == Some(SQLITE_CANTOPEN) => {
                Error::ConnectionFailure(db.message().to_string())
            }
            _ => Error::Db(err.to_string()),
        },
        sqlx::Error::Configuration(_)
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => Error::ConnectionFailure(err.to_string()),
        _ => Error::Db(err.to_string()),
    }
}
