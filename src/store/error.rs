use thiserror::Error;

use crate::model::Id;

/// Constraint outcomes the store reports in a form callers can match on.
///
/// These travel inside `anyhow::Error`; use `downcast_ref` to recover them.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Item with SKU '{0}' already exists.")]
    DuplicateSku(String),
    #[error("A record with id '{0}' already exists.")]
    DuplicateId(Id),
    #[error("Item '{0}' not found.")]
    ItemMissing(Id),
}
