//! Staff service

use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseConnection, Set};

use super::{read_only, read_write};
use crate::entity::staff;
use crate::error::{AppError, AppResult, OptionExt};
use crate::repository::{department as department_repo, staff as staff_repo};

/// Validated fields of a create or update request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffInput {
    pub staff_name: String,
    pub department_id: i64,
    pub salary: Decimal,
}

#[derive(Clone)]
pub struct StaffService {
    db: Arc<DatabaseConnection>,
}

fn staff_not_found(id: i64) -> String {
    format!("Staff not found with id: {}", id)
}

/// Referential check for the department a staff record points at
async fn ensure_department<C: ConnectionTrait>(db: &C, department_id: i64) -> AppResult<()> {
    if department_repo::exists_by_id(db, department_id).await? {
        Ok(())
    } else {
        Err(AppError::InvalidReference(format!(
            "Department not found with id: {}",
            department_id
        )))
    }
}

impl StaffService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> AppResult<Vec<staff::Model>> {
        read_only(&self.db, |txn| {
            Box::pin(async move { Ok(staff_repo::find_all(txn).await?) })
        })
        .await
    }

    pub async fn get(&self, id: i64) -> AppResult<staff::Model> {
        read_only(&self.db, move |txn| {
            Box::pin(async move {
                staff_repo::find_by_id(txn, id)
                    .await?
                    .ok_or_not_found(staff_not_found(id))
            })
        })
        .await
    }

    pub async fn create(&self, input: StaffInput) -> AppResult<staff::Model> {
        let created = read_write(&self.db, move |txn| {
            Box::pin(async move {
                ensure_department(txn, input.department_id).await?;

                let now = Utc::now();
                let record = staff::ActiveModel {
                    staff_name: Set(input.staff_name),
                    department_id: Set(input.department_id),
                    salary: Set(input.salary),
                    created_date: Set(now),
                    updated_date: Set(now),
                    ..Default::default()
                };
                Ok(staff_repo::insert(txn, record).await?)
            })
        })
        .await?;

        tracing::info!(
            "Created staff {} in department {}",
            created.staff_id,
            created.department_id
        );
        Ok(created)
    }

    /// Full replacement of name, department and salary
    pub async fn update(&self, id: i64, input: StaffInput) -> AppResult<staff::Model> {
        let updated = read_write(&self.db, move |txn| {
            Box::pin(async move {
                let existing = staff_repo::find_by_id(txn, id)
                    .await?
                    .ok_or_not_found(staff_not_found(id))?;
                ensure_department(txn, input.department_id).await?;

                // id and created_date stay Unchanged and are left out of the SET list
                let mut record: staff::ActiveModel = existing.into();
                record.staff_name = Set(input.staff_name);
                record.department_id = Set(input.department_id);
                record.salary = Set(input.salary);
                record.updated_date = Set(Utc::now());
                Ok(staff_repo::update(txn, record).await?)
            })
        })
        .await?;

        tracing::info!("Updated staff {}", updated.staff_id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        read_write(&self.db, move |txn| {
            Box::pin(async move {
                if !staff_repo::exists_by_id(txn, id).await? {
                    return Err(AppError::NotFound(staff_not_found(id)));
                }
                staff_repo::delete_by_id(txn, id).await?;
                Ok(())
            })
        })
        .await?;

        tracing::info!("Deleted staff {}", id);
        Ok(())
    }

    pub async fn by_department(&self, department_id: i64) -> AppResult<Vec<staff::Model>> {
        read_only(&self.db, move |txn| {
            Box::pin(async move { Ok(staff_repo::find_by_department_id(txn, department_id).await?) })
        })
        .await
    }

    /// Staff of the department with exactly this name; empty when there is none
    pub async fn by_department_name(&self, name: &str) -> AppResult<Vec<staff::Model>> {
        let name = name.to_string();
        read_only(&self.db, move |txn| {
            Box::pin(async move {
                match department_repo::find_by_name(txn, &name).await? {
                    Some(dept) => Ok(staff_repo::find_by_department_id(txn, dept.department_id).await?),
                    None => Ok(Vec::new()),
                }
            })
        })
        .await
    }

    pub async fn by_minimum_salary(&self, min: Decimal) -> AppResult<Vec<staff::Model>> {
        read_only(&self.db, move |txn| {
            Box::pin(async move { Ok(staff_repo::find_by_salary_greater_or_equal(txn, min).await?) })
        })
        .await
    }

    /// Inclusive range
    pub async fn by_salary_range(&self, min: Decimal, max: Decimal) -> AppResult<Vec<staff::Model>> {
        if min > max {
            return Err(AppError::validation(
                "minSalary",
                "Minimum salary must not be greater than maximum salary",
            ));
        }
        read_only(&self.db, move |txn| {
            Box::pin(async move { Ok(staff_repo::find_by_salary_between(txn, min, max).await?) })
        })
        .await
    }

    pub async fn by_name(&self, fragment: &str) -> AppResult<Vec<staff::Model>> {
        let fragment = fragment.to_string();
        read_only(&self.db, move |txn| {
            Box::pin(async move { Ok(staff_repo::find_by_name_containing(txn, &fragment).await?) })
        })
        .await
    }

    /// `None` when there are no staff records at all
    pub async fn highest_paid(&self) -> AppResult<Option<staff::Model>> {
        read_only(&self.db, |txn| {
            Box::pin(async move { Ok(staff_repo::find_top_by_salary_descending(txn).await?) })
        })
        .await
    }

    /// Zero for departments without staff, including unknown ones
    pub async fn count_by_department(&self, department_id: i64) -> AppResult<u64> {
        read_only(&self.db, move |txn| {
            Box::pin(async move { Ok(staff_repo::count_by_department_id(txn, department_id).await?) })
        })
        .await
    }
}
