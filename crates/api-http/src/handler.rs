//! HTTP Route Handlers
//!
//! Each handler extracts the caller, decodes input and delegates to one
//! service call. No business rules live here.

use crate::error::ApiError;
use crate::identity::CallerId;
use crate::types::{CreateProjectRequest, CreateTaskRequest, ListTasksQuery, UpdateTaskRequest};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use taskboard_core::application::{ProjectService, TaskService};
use taskboard_core::domain::{Project, ProjectId, Task, TaskId};
use taskboard_core::error::AppError;

/// Shared handler state; cloned per request
#[derive(Clone)]
pub struct AppState {
    pub projects: Arc<ProjectService>,
    pub tasks: Arc<TaskService>,
}

/// Routes without middleware; see [`crate::server::app`] for the full stack
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/{id}", get(get_project))
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", get(get_task).put(update_task))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn list_projects(
    State(state): State<AppState>,
    CallerId(owner): CallerId,
) -> Result<Json<Vec<Project>>, ApiError> {
    Ok(Json(state.projects.list(&owner).await?))
}

async fn create_project(
    State(state): State<AppState>,
    CallerId(owner): CallerId,
    payload: Result<Json<CreateProjectRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    let Json(req) = payload?;
    let project = state
        .projects
        .create(&owner, &req.name, &req.description)
        .await?;
    Ok((StatusCode::CREATED, Json(project)))
}

async fn get_project(
    State(state): State<AppState>,
    CallerId(owner): CallerId,
    id: Result<Path<ProjectId>, PathRejection>,
) -> Result<Json<Project>, ApiError> {
    let Path(id) = id?;
    state
        .projects
        .get(id, &owner)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found_project(id).into())
}

async fn list_tasks(
    State(state): State<AppState>,
    CallerId(owner): CallerId,
    query: Result<Query<ListTasksQuery>, QueryRejection>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let Query(query) = query?;
    Ok(Json(state.tasks.list(&owner, query.project_id).await?))
}

async fn create_task(
    State(state): State<AppState>,
    CallerId(owner): CallerId,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let Json(req) = payload?;
    let task = state
        .tasks
        .create(&owner, req.project_id, &req.title, &req.description)
        .await?;
    Ok((StatusCode::CREATED, Json(task)))
}

async fn get_task(
    State(state): State<AppState>,
    CallerId(owner): CallerId,
    id: Result<Path<TaskId>, PathRejection>,
) -> Result<Json<Task>, ApiError> {
    let Path(id) = id?;
    state
        .tasks
        .get(id, &owner)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found_task(id).into())
}

async fn update_task(
    State(state): State<AppState>,
    CallerId(owner): CallerId,
    id: Result<Path<TaskId>, PathRejection>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let Path(id) = id?;
    let Json(req) = payload?;
    let task = state.tasks.update(id, &owner, req.into_patch()?).await?;
    Ok(Json(task))
}
