//! Staff handlers
//!
//! CRUD plus the filter and aggregate queries under `/staff`

use std::str::FromStr;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_extra::extract::WithRejection;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{rule_error, validate_name, MessageResponse};
use crate::entity::staff;
use crate::error::{AppError, AppResult, OptionExt};
use crate::extract::ValidatedJson;
use crate::service::StaffInput;
use crate::state::AppState;

const SALARY_SCALE: u32 = 2;
/// First value that no longer fits `decimal(12, 2)`
const SALARY_LIMIT: i64 = 10_000_000_000;

/// Create / update request body
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StaffRequest {
    #[validate(required(message = "Staff name is required"), custom = "validate_name")]
    pub staff_name: Option<String>,

    #[validate(required(message = "Department ID is required"))]
    pub department_id: Option<i64>,

    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    #[validate(required(message = "Salary is required"), custom = "validate_salary")]
    pub salary: Option<Decimal>,
}

fn validate_salary(salary: &Decimal) -> Result<(), ValidationError> {
    if salary.is_sign_negative() || salary.is_zero() {
        return Err(rule_error("positive", "Salary must be positive"));
    }
    if salary.normalize().scale() > SALARY_SCALE {
        return Err(rule_error("scale", "Salary must have at most two decimal places"));
    }
    if *salary >= Decimal::from(SALARY_LIMIT) {
        return Err(rule_error("range", "Salary must be less than 10000000000"));
    }
    Ok(())
}

impl TryFrom<StaffRequest> for StaffInput {
    type Error = AppError;

    fn try_from(req: StaffRequest) -> Result<Self, Self::Error> {
        match (req.staff_name, req.department_id, req.salary) {
            (Some(name), Some(department_id), Some(mut salary)) => {
                salary.rescale(SALARY_SCALE);
                Ok(StaffInput {
                    staff_name: name.trim().to_string(),
                    department_id,
                    salary,
                })
            }
            _ => Err(AppError::BadRequest("Incomplete staff payload".to_string())),
        }
    }
}

/// Staff response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffResponse {
    pub staff_id: i64,
    pub staff_name: String,
    pub department_id: i64,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub salary: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<staff::Model> for StaffResponse {
    fn from(m: staff::Model) -> Self {
        let mut salary = m.salary;
        salary.rescale(SALARY_SCALE);
        Self {
            staff_id: m.staff_id,
            staff_name: m.staff_name,
            department_id: m.department_id,
            salary,
            created_at: m.created_date,
            updated_at: m.updated_date,
        }
    }
}

fn to_responses(records: Vec<staff::Model>) -> Json<Vec<StaffResponse>> {
    Json(records.into_iter().map(StaffResponse::from).collect())
}

/// Query parameters for name search
#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub name: String,
}

/// Query parameters for salary range
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryRangeQuery {
    pub min_salary: String,
    pub max_salary: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentCountResponse {
    pub department_id: i64,
    pub count: u64,
}

fn parse_decimal(field: &str, raw: &str) -> AppResult<Decimal> {
    Decimal::from_str(raw.trim())
        .map_err(|_| AppError::validation(field, format!("'{}' is not a valid decimal number", raw)))
}

/// GET /staff
pub async fn list_staff(State(state): State<AppState>) -> AppResult<Json<Vec<StaffResponse>>> {
    Ok(to_responses(state.staff.list().await?))
}

/// GET /staff/:id
pub async fn get_staff(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<Json<StaffResponse>> {
    Ok(Json(state.staff.get(id).await?.into()))
}

/// POST /staff
pub async fn create_staff(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<StaffRequest>,
) -> AppResult<(StatusCode, Json<StaffResponse>)> {
    let created = state.staff.create(req.try_into()?).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// PUT /staff/:id
pub async fn update_staff(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    ValidatedJson(req): ValidatedJson<StaffRequest>,
) -> AppResult<Json<StaffResponse>> {
    let updated = state.staff.update(id, req.try_into()?).await?;
    Ok(Json(updated.into()))
}

/// DELETE /staff/:id
pub async fn delete_staff(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<Json<MessageResponse>> {
    state.staff.delete(id).await?;
    Ok(Json(MessageResponse::new("Staff deleted successfully")))
}

/// GET /staff/search?name=
pub async fn search_staff(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<NameQuery>, AppError>,
) -> AppResult<Json<Vec<StaffResponse>>> {
    Ok(to_responses(state.staff.by_name(&query.name).await?))
}

/// GET /staff/department/:id
pub async fn staff_by_department(
    State(state): State<AppState>,
    WithRejection(Path(department_id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<Json<Vec<StaffResponse>>> {
    Ok(to_responses(state.staff.by_department(department_id).await?))
}

/// GET /staff/department/:id/count
pub async fn count_by_department(
    State(state): State<AppState>,
    WithRejection(Path(department_id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<Json<DepartmentCountResponse>> {
    let count = state.staff.count_by_department(department_id).await?;
    Ok(Json(DepartmentCountResponse { department_id, count }))
}

/// GET /staff/department-name/:name
pub async fn staff_by_department_name(
    State(state): State<AppState>,
    WithRejection(Path(name), _): WithRejection<Path<String>, AppError>,
) -> AppResult<Json<Vec<StaffResponse>>> {
    Ok(to_responses(state.staff.by_department_name(&name).await?))
}

/// GET /staff/salary/:min
pub async fn staff_by_minimum_salary(
    State(state): State<AppState>,
    WithRejection(Path(min), _): WithRejection<Path<String>, AppError>,
) -> AppResult<Json<Vec<StaffResponse>>> {
    let min = parse_decimal("min", &min)?;
    Ok(to_responses(state.staff.by_minimum_salary(min).await?))
}

/// GET /staff/salary-range?minSalary=&maxSalary=
pub async fn staff_by_salary_range(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<SalaryRangeQuery>, AppError>,
) -> AppResult<Json<Vec<StaffResponse>>> {
    let min = parse_decimal("minSalary", &query.min_salary)?;
    let max = parse_decimal("maxSalary", &query.max_salary)?;
    Ok(to_responses(state.staff.by_salary_range(min, max).await?))
}

/// GET /staff/highest-paid
pub async fn highest_paid(State(state): State<AppState>) -> AppResult<Json<StaffResponse>> {
    let top = state
        .staff
        .highest_paid()
        .await?
        .ok_or_not_found("No staff records found")?;
    Ok(Json(top.into()))
}
