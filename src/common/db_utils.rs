use std::sync::{PoisonError, RwLockReadGuard, RwLockWriteGuard};

use crate::common::error::AppError;

// ---
// Helper: lock envenenado vira erro interno (em vez de panic na thread do handler)
// ---
pub(crate) fn poisoned_read<T>(_: PoisonError<RwLockReadGuard<'_, T>>) -> AppError {
    AppError::InternalServerError(anyhow::anyhow!("store lock poisoned (read)"))
}

pub(crate) fn poisoned_write<T>(_: PoisonError<RwLockWriteGuard<'_, T>>) -> AppError {
    AppError::InternalServerError(anyhow::anyhow!("store lock poisoned (write)"))
}
