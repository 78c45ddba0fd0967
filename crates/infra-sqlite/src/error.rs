// sqlx::Error -> AppError mapping

use taskboard_core::error::AppError;

/// Convert sqlx::Error to AppError::Persistence with structured information
///
/// The message is for logs; the HTTP adapter never echoes it to callers.
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => {
            let message = db_err.message();
            match db_err.code().as_deref() {
                // SQLite extended result codes: https://www.sqlite.org/rescode.html
                Some(code @ ("2067" | "1555")) => {
                    AppError::Persistence(format!("Unique constraint violation: {} ({})", message, code))
                }
                Some(code @ ("787" | "3850")) => AppError::Persistence(format!(
                    "Foreign key constraint violation: {} ({})",
                    message, code
                )),
                Some("5") => AppError::Persistence(format!("Database locked (SQLITE_BUSY): {}", message)),
                Some("13") => AppError::Persistence(format!("Database full: {}", message)),
                Some(code) => AppError::Persistence(format!("Database error [{}]: {}", code, message)),
                None => AppError::Persistence(format!("Database error: {}", message)),
            }
        }
        sqlx::Error::PoolTimedOut => AppError::Timeout("database pool exhausted".to_string()),
        sqlx::Error::ColumnNotFound(col) => {
            AppError::Persistence(format!("Column not found: {}", col))
        }
        _ => AppError::Persistence(err.to_string()),
    }
}
