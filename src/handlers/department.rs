//! Department handlers
//!
//! Implements department CRUD operations

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use axum_extra::extract::WithRejection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{validate_name, MessageResponse};
use crate::entity::department;
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::service::DepartmentInput;
use crate::state::AppState;

/// Create / update department request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentRequest {
    #[validate(required(message = "Department name is required"), custom = "validate_name")]
    pub department_name: Option<String>,
    pub description: Option<String>,
}

impl TryFrom<DepartmentRequest> for DepartmentInput {
    type Error = AppError;

    fn try_from(req: DepartmentRequest) -> Result<Self, Self::Error> {
        let name = req
            .department_name
            .ok_or_else(|| AppError::validation("departmentName", "Department name is required"))?;
        Ok(DepartmentInput {
            department_name: name.trim().to_string(),
            description: req.description.filter(|d| !d.trim().is_empty()),
        })
    }
}

/// Department response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentResponse {
    pub department_id: i64,
    pub department_name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<department::Model> for DepartmentResponse {
    fn from(m: department::Model) -> Self {
        Self {
            department_id: m.department_id,
            department_name: m.department_name,
            description: m.description,
            created_at: m.created_date,
        }
    }
}

/// GET /department, GET /staff/departments
pub async fn list_departments(State(state): State<AppState>) -> AppResult<Json<Vec<DepartmentResponse>>> {
    let departments = state.departments.list().await?;
    Ok(Json(departments.into_iter().map(DepartmentResponse::from).collect()))
}

/// GET /department/:id
pub async fn get_department(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<Json<DepartmentResponse>> {
    Ok(Json(state.departments.get(id).await?.into()))
}

/// POST /department
pub async fn create_department(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<DepartmentRequest>,
) -> AppResult<(StatusCode, Json<DepartmentResponse>)> {
    let created = state.departments.create(req.try_into()?).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// PUT /department/:id
pub async fn update_department(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    ValidatedJson(req): ValidatedJson<DepartmentRequest>,
) -> AppResult<Json<DepartmentResponse>> {
    let updated = state.departments.update(id, req.try_into()?).await?;
    Ok(Json(updated.into()))
}

/// DELETE /department/:id
pub async fn delete_department(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<Json<MessageResponse>> {
    state.departments.delete(id).await?;
    Ok(Json(MessageResponse::new("Department deleted successfully")))
}
