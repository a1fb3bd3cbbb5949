use crate::{
    auth::CurrentUser,
    error::AppError,
    models::{CreateTaskInput, TaskFilter, UpdateTaskStatus},
    state::AppState,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use validator::Validate;

/// Retrieves the authenticated user's tasks.
///
/// ## Query Parameters:
/// - `status` (optional): `OPEN`, `IN_PROGRESS` or `DONE`.
/// - `search` (optional, non-empty): case-insensitive match on title or description.
///
/// ## Responses:
/// - `200 OK`: JSON array of tasks, possibly empty.
/// - `400 Bad Request`: unknown status or empty search.
/// - `401 Unauthorized`: missing or invalid token.
#[get("")]
pub async fn get_tasks(
    state: web::Data<AppState>,
    filter: web::Query<TaskFilter>,
    current: CurrentUser,
) -> Result<impl Responder, AppError> {
    filter.validate()?;
    let tasks = state.tasks.get_tasks(&filter, &current.0).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a task owned by the authenticated user, with status `OPEN`.
///
/// ## Responses:
/// - `201 Created`: the new task.
/// - `400 Bad Request`: malformed body or empty title.
/// - `401 Unauthorized`: missing or invalid token.
#[post("")]
pub async fn create_task(
    state: web::Data<AppState>,
    input: web::Json<CreateTaskInput>,
    current: CurrentUser,
) -> Result<impl Responder, AppError> {
    let task = state
        .tasks
        .create_task(input.into_inner(), &current.0)
        .await?;
    Ok(HttpResponse::Created().json(task))
}

/// Retrieves one of the authenticated user's tasks.
///
/// ## Responses:
/// - `200 OK`: the task.
/// - `400 Bad Request`: non-numeric id.
/// - `404 Not Found`: no such task for this user.
#[get("/{id}")]
pub async fn get_task(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    current: CurrentUser,
) -> Result<impl Responder, AppError> {
    let task = state
        .tasks
        .get_task_by_id(id.into_inner(), &current.0)
        .await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Sets the status of one of the authenticated user's tasks.
///
/// ## Request Body:
/// `{"status": "OPEN" | "IN_PROGRESS" | "DONE"}`
///
/// ## Responses:
/// - `200 OK`: the updated task.
/// - `400 Bad Request`: unknown status value.
/// - `404 Not Found`: no such task for this user.
#[patch("/{id}/status")]
pub async fn update_task_status(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    body: web::Json<UpdateTaskStatus>,
    current: CurrentUser,
) -> Result<impl Responder, AppError> {
    let task = state
        .tasks
        .update_status_by_id(id.into_inner(), body.status, &current.0)
        .await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Deletes one of the authenticated user's tasks.
///
/// ## Responses:
/// - `204 No Content`: deleted.
/// - `404 Not Found`: no such task for this user, including one already deleted.
#[delete("/{id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    current: CurrentUser,
) -> Result<impl Responder, AppError> {
    state
        .tasks
        .delete_task_by_id(id.into_inner(), &current.0)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
