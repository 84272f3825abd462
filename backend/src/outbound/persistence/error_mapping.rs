//! Translation of pool and Diesel failures into port errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{PasteRepositoryError, StorageProbeError};

use super::pool::PoolError;

pub(super) fn map_pool_error(error: PoolError) -> PasteRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            PasteRepositoryError::connection(message)
        }
    }
}

pub(super) fn map_diesel_error(error: DieselError) -> PasteRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => PasteRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => PasteRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            PasteRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            PasteRepositoryError::query("paste violates a table constraint")
        }
        _ => PasteRepositoryError::query("database error"),
    }
}

/// Like [`map_diesel_error`], but a unique violation means the slug is taken.
pub(super) fn map_insert_error(error: DieselError, slug: &str) -> PasteRepositoryError {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            PasteRepositoryError::duplicate_slug(slug)
        }
        other => map_diesel_error(other),
    }
}

pub(super) fn probe_failure(error: impl std::fmt::Display) -> StorageProbeError {
    StorageProbeError::unreachable(error.to_string())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(PoolError::checkout("timed out"))]
    #[case(PoolError::build("bad url"))]
    fn pool_errors_are_connection_failures(#[case] error: PoolError) {
        assert!(matches!(
            map_pool_error(error),
            PasteRepositoryError::Connection { .. }
        ));
    }

    #[rstest]
    #[case(DieselError::NotFound, "record not found")]
    #[case(DieselError::RollbackTransaction, "database error")]
    fn diesel_errors_become_query_failures(#[case] error: DieselError, #[case] message: &str) {
        assert_eq!(map_diesel_error(error), PasteRepositoryError::query(message));
    }

    #[test]
    fn non_unique_insert_failures_keep_general_mapping() {
        assert_eq!(
            map_insert_error(DieselError::NotFound, "abc123"),
            PasteRepositoryError::query("record not found")
        );
    }
}
