use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Json, response::IntoResponse};
use serde::Deserialize;

use crate::db::models::{Department, DepartmentDetail, Organization, OrganizationDetail};
use crate::error::ApiError;
use crate::server::extract::AuthClaims;
use crate::server::handlers::users::MessageResponse;
use crate::server::router::AppState;

#[derive(Debug, Deserialize)]
pub struct OrgRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeptRequest {
    pub name: Option<String>,
    #[serde(rename = "orgId")]
    pub org_id: Option<i64>,
}

/// POST /api/orgs.
pub async fn create_org(
    State(state): State<AppState>,
    _session: AuthClaims,
    Json(req): Json<OrgRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = req
        .name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::Validation("organization name is required".to_string()))?;
    let org = state.orgs.create_org(name, req.description).await?;
    Ok((StatusCode::CREATED, Json(org)))
}

/// GET /api/orgs.
pub async fn list_orgs(
    State(state): State<AppState>,
    _session: AuthClaims,
) -> Result<Json<Vec<Organization>>, ApiError> {
    Ok(Json(state.orgs.list_orgs().await?))
}

/// GET /api/orgs/{id}, departments embedded.
pub async fn get_org(
    State(state): State<AppState>,
    _session: AuthClaims,
    Path(id): Path<i64>,
) -> Result<Json<OrganizationDetail>, ApiError> {
    let detail = state
        .orgs
        .org_detail(id)
        .await?
        .ok_or(ApiError::NotFound("Organization"))?;
    Ok(Json(detail))
}

/// PUT /api/orgs/{id}.
pub async fn update_org(
    State(state): State<AppState>,
    _session: AuthClaims,
    Path(id): Path<i64>,
    Json(req): Json<OrgRequest>,
) -> Result<Json<Organization>, ApiError> {
    let org = state
        .orgs
        .update_org(id, req.name.filter(|n| !n.is_empty()), req.description)
        .await?;
    Ok(Json(org))
}

/// DELETE /api/orgs/{id}.
pub async fn delete_org(
    State(state): State<AppState>,
    _session: AuthClaims,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.orgs.delete_org(id).await?;
    Ok(Json(MessageResponse {
        message: "Organization deleted successfully",
    }))
}

/// POST /api/dept.
pub async fn create_dept(
    State(state): State<AppState>,
    _session: AuthClaims,
    Json(req): Json<DeptRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = req
        .name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::Validation("department name is required".to_string()))?;
    let org_id = req
        .org_id
        .ok_or_else(|| ApiError::Validation("orgId is required".to_string()))?;
    let dept = state.orgs.create_dept(name, org_id).await?;
    Ok((StatusCode::CREATED, Json(dept)))
}

/// GET /api/dept, parent organizations embedded.
pub async fn list_depts(
    State(state): State<AppState>,
    _session: AuthClaims,
) -> Result<Json<Vec<DepartmentDetail>>, ApiError> {
    Ok(Json(state.orgs.list_depts().await?))
}

/// GET /api/dept/{id}.
pub async fn get_dept(
    State(state): State<AppState>,
    _session: AuthClaims,
    Path(id): Path<i64>,
) -> Result<Json<DepartmentDetail>, ApiError> {
    let detail = state
        .orgs
        .dept_detail(id)
        .await?
        .ok_or(ApiError::NotFound("Department"))?;
    Ok(Json(detail))
}

/// PUT /api/dept/{id}.
pub async fn update_dept(
    State(state): State<AppState>,
    _session: AuthClaims,
    Path(id): Path<i64>,
    Json(req): Json<DeptRequest>,
) -> Result<Json<Department>, ApiError> {
    let dept = state
        .orgs
        .update_dept(id, req.name.filter(|n| !n.is_empty()), req.org_id)
        .await?;
    Ok(Json(dept))
}

/// DELETE /api/dept/{id}.
pub async fn delete_dept(
    State(state): State<AppState>,
    _session: AuthClaims,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.orgs.delete_dept(id).await?;
    Ok(Json(MessageResponse {
        message: "Department deleted successfully",
    }))
}
