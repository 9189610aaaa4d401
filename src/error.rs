use chrono::NaiveDate;
use sqlx::error::ErrorKind;

/// Error type for dataset operations.
///
/// Constraint violations raised by PostgreSQL are classified so callers can
/// tell a primary-key collision from a dangling foreign key. The engine's
/// message is kept verbatim.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Unique constraint violated ({constraint:?}): {message}")]
    UniqueViolation {
        constraint: Option<String>,
        message: String,
    },

    #[error("Foreign key constraint violated ({constraint:?}): {message}")]
    ForeignKeyViolation {
        constraint: Option<String>,
        message: String,
    },

    #[error("Invalid date range: {from} is after {to}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },

    #[error("Invalid fixture: {0}")]
    InvalidFixture(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transaction already committed or rolled back")]
    TransactionClosed,

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

/// Result type for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;

impl DatasetError {
    /// True for primary-key or unique collisions.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation { .. })
    }

    /// True when a foreign key did not resolve.
    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(self, Self::ForeignKeyViolation { .. })
    }
}

impl From<sqlx::Error> for DatasetError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err.constraint().map(str::to_owned);
            let message = db_err.message().to_owned();
            match db_err.kind() {
                ErrorKind::UniqueViolation => {
                    return Self::UniqueViolation {
                        constraint,
                        message,
                    }
                }
                ErrorKind::ForeignKeyViolation => {
                    return Self::ForeignKeyViolation {
                        constraint,
                        message,
                    }
                }
                _ => {}
            }
        }
        Self::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_stay_verbatim() {
        let err = DatasetError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, DatasetError::Database(sqlx::Error::RowNotFound)));
        assert!(!err.is_unique_violation());
        assert!(!err.is_foreign_key_violation());
    }

    #[test]
    fn invalid_range_message_names_both_ends() {
        let from = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let err = DatasetError::InvalidRange { from, to };
        assert_eq!(
            err.to_string(),
            "Invalid date range: 2024-03-01 is after 2024-02-01"
        );
    }
}
