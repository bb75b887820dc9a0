//! Service layer
//!
//! Services are built once at startup from the database connection and handed
//! to the router through `AppState`. Each public operation runs in exactly one
//! transaction: read-only for queries, read-write for mutations.

use std::future::Future;
use std::pin::Pin;

use sea_orm::{AccessMode, DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::error::{AppError, AppResult};

pub mod department;
pub mod staff;

pub use department::{DepartmentInput, DepartmentService};
pub use staff::{StaffInput, StaffService};

type TxnFuture<'c, T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'c>>;

/// Run `work` inside a read-only transaction
async fn read_only<F, T>(db: &DatabaseConnection, work: F) -> AppResult<T>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> TxnFuture<'c, T> + Send,
    T: Send,
{
    db.transaction_with_config(work, None, Some(AccessMode::ReadOnly))
        .await
        .map_err(AppError::from)
}

/// Run `work` inside a read-write transaction; any error rolls it back
async fn read_write<F, T>(db: &DatabaseConnection, work: F) -> AppResult<T>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> TxnFuture<'c, T> + Send,
    T: Send,
{
    db.transaction(work).await.map_err(AppError::from)
}
