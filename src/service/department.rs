//! Department service

use chrono::Utc;
use std::sync::Arc;

use sea_orm::{DatabaseConnection, DbErr, Set, SqlErr};

use super::{read_only, read_write};
use crate::entity::department;
use crate::error::{AppError, AppResult, OptionExt};
use crate::repository::{department as department_repo, staff as staff_repo};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentInput {
    pub department_name: String,
    pub description: Option<String>,
}

#[derive(Clone)]
pub struct DepartmentService {
    db: Arc<DatabaseConnection>,
}

fn department_not_found(id: i64) -> String {
    format!("Department not found with id: {}", id)
}

fn name_taken(name: &str) -> AppError {
    AppError::Conflict(format!("Department name already exists: {}", name))
}

fn still_has_staff(id: i64, staff_count: u64) -> AppError {
    AppError::Conflict(format!(
        "Department {} still has {} staff record(s)",
        id, staff_count
    ))
}

/// A staff row inserted after the count check trips the RESTRICT key on delete
fn delete_error(id: i64, err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            AppError::Conflict(format!("Department {} still has staff records", id))
        }
        _ => AppError::from(err),
    }
}

impl DepartmentService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> AppResult<Vec<department::Model>> {
        read_only(&self.db, |txn| {
            Box::pin(async move { Ok(department_repo::find_all(txn).await?) })
        })
        .await
    }

    pub async fn get(&self, id: i64) -> AppResult<department::Model> {
        read_only(&self.db, move |txn| {
            Box::pin(async move {
                department_repo::find_by_id(txn, id)
                    .await?
                    .ok_or_not_found(department_not_found(id))
            })
        })
        .await
    }

    pub async fn create(&self, input: DepartmentInput) -> AppResult<department::Model> {
        let created = read_write(&self.db, move |txn| {
            Box::pin(async move {
                if department_repo::exists_by_name(txn, &input.department_name, None).await? {
                    return Err(name_taken(&input.department_name));
                }
                let record = department::ActiveModel {
                    department_name: Set(input.department_name),
                    description: Set(input.description),
                    created_date: Set(Utc::now()),
                    ..Default::default()
                };
                Ok(department_repo::insert(txn, record).await?)
            })
        })
        .await?;

        tracing::info!("Created department {} ({})", created.department_id, created.department_name);
        Ok(created)
    }

    pub async fn update(&self, id: i64, input: DepartmentInput) -> AppResult<department::Model> {
        let updated = read_write(&self.db, move |txn| {
            Box::pin(async move {
                let existing = department_repo::find_by_id(txn, id)
                    .await?
                    .ok_or_not_found(department_not_found(id))?;
                if department_repo::exists_by_name(txn, &input.department_name, Some(id)).await? {
                    return Err(name_taken(&input.department_name));
                }

                let mut record: department::ActiveModel = existing.into();
                record.department_name = Set(input.department_name);
                record.description = Set(input.description);
                Ok(department_repo::update(txn, record).await?)
            })
        })
        .await?;

        tracing::info!("Updated department {}", updated.department_id);
        Ok(updated)
    }

    /// Refused while any staff record still belongs to the department
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        read_write(&self.db, move |txn| {
            Box::pin(async move {
                if !department_repo::exists_by_id(txn, id).await? {
                    return Err(AppError::NotFound(department_not_found(id)));
                }
                let staff_count = staff_repo::count_by_department_id(txn, id).await?;
                if staff_count > 0 {
                    return Err(still_has_staff(id, staff_count));
                }
                department_repo::delete_by_id(txn, id)
                    .await
                    .map_err(|err| delete_error(id, err))?;
                Ok(())
            })
        })
        .await?;

        tracing::info!("Deleted department {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{count_row, department_model, executed_sql};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn input(name: &str) -> DepartmentInput {
        DepartmentInput {
            department_name: name.to_string(),
            description: Some("Lab sciences".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_department() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(0)]])
            .append_query_results([vec![department_model(1, "Physics")]])
            .into_connection());

        let created = DepartmentService::new(db.clone()).create(input("Physics")).await.unwrap();
        assert_eq!(created.department_id, 1);
        assert!(executed_sql(db).contains(r#"INSERT INTO \"department\""#));
    }

    #[tokio::test]
    async fn test_create_duplicate_name() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(1)]])
            .into_connection());

        let err = DepartmentService::new(db.clone()).create(input("Physics")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert!(!executed_sql(db).contains("INSERT"));
    }

    #[tokio::test]
    async fn test_update_missing_department() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<department::Model>::new()])
            .into_connection());

        let err = DepartmentService::new(db).update(4, input("Physics")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_department_with_staff_is_refused() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(1)]])
            .append_query_results([vec![count_row(2)]])
            .into_connection());

        let err = DepartmentService::new(db.clone()).delete(1).await.unwrap_err();
        match err {
            AppError::Conflict(msg) => assert_eq!(msg, "Department 1 still has 2 staff record(s)"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!executed_sql(db).contains("DELETE"));
    }

    #[tokio::test]
    async fn test_delete_empty_department() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(1)]])
            .append_query_results([vec![count_row(0)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection());

        DepartmentService::new(db.clone()).delete(1).await.unwrap();
        assert!(executed_sql(db).contains(r#"DELETE FROM \"department\""#));
    }

    #[tokio::test]
    async fn test_delete_failure_without_violation_stays_internal() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(1)]])
            .append_query_results([vec![count_row(0)]])
            .append_exec_errors([DbErr::Custom("connection reset".into())])
            .into_connection());

        let err = DepartmentService::new(db).delete(1).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn test_delete_error_keeps_other_errors() {
        let err = delete_error(3, DbErr::RecordNotUpdated);
        assert!(matches!(err, AppError::Database(_)));
    }
}
