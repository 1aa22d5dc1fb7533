//! Repository implementations, one per entity.

pub mod furniture;
pub mod item;
pub mod room;
pub mod storage_cell;

pub use furniture::FurnitureRepository;
pub use item::ItemRepository;
pub use room::RoomRepository;
pub use storage_cell::StorageCellRepository;

use homestash_core::error::{AppError, ErrorKind};

/// PostgreSQL SQLSTATE for unique-constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Whether a sqlx error is a unique-constraint violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION)
    )
}

/// Map a sqlx error into an [`AppError`]: unique violations become
/// `Conflict` (so allocation loops can retry them), everything else is a
/// database error carrying its source.
pub(crate) fn map_sqlx(err: sqlx::Error, context: &str) -> AppError {
    if is_unique_violation(&err) {
        AppError::with_source(ErrorKind::Conflict, format!("{context}: duplicate"), err)
    } else {
        AppError::with_source(ErrorKind::Database, context.to_string(), err)
    }
}
