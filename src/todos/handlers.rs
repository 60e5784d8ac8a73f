use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::jwt::AuthUser,
    error::{AppError, AppJson},
    state::AppState,
    todos::{
        dto::{CreateTodoRequest, TodoResponse, UpdateTodoRequest},
        repo::Todo,
    },
};

pub fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/:id", put(update_todo).delete(delete_todo))
}

fn validate_title(title: &str) -> Result<&str, AppError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("title must not be empty"));
    }
    Ok(trimmed)
}

#[instrument(skip(state))]
pub async fn list_todos(
    State(state): State<AppState>,
    AuthUser(owner): AuthUser,
) -> Result<Json<Vec<TodoResponse>>, AppError> {
    let todos = Todo::list_by_owner(&state.db, owner).await?;
    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

#[instrument(skip(state, payload))]
pub async fn create_todo(
    State(state): State<AppState>,
    AuthUser(owner): AuthUser,
    AppJson(payload): AppJson<CreateTodoRequest>,
) -> Result<(StatusCode, Json<TodoResponse>), AppError> {
    let title = validate_title(&payload.title)?;
    let todo = Todo::insert(&state.db, owner, title).await?;
    info!(todo_id = %todo.id, %owner, "todo created");
    Ok((StatusCode::CREATED, Json(todo.into())))
}

#[instrument(skip(state, payload))]
pub async fn update_todo(
    State(state): State<AppState>,
    AuthUser(owner): AuthUser,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateTodoRequest>,
) -> Result<Json<TodoResponse>, AppError> {
    let title = payload.title.as_deref().map(validate_title).transpose()?;

    match Todo::update(&state.db, owner, id, title, payload.completed).await? {
        Some(todo) => {
            info!(todo_id = %todo.id, %owner, "todo updated");
            Ok(Json(todo.into()))
        }
        None => {
            // Unknown and foreign ids look the same on purpose.
            warn!(todo_id = %id, %owner, "todo not found for update");
            Err(AppError::not_found("todo not found"))
        }
    }
}

#[instrument(skip(state))]
pub async fn delete_todo(
    State(state): State<AppState>,
    AuthUser(owner): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !Todo::delete(&state.db, owner, id).await? {
        warn!(todo_id = %id, %owner, "todo not found for delete");
        return Err(AppError::not_found("todo not found"));
    }
    info!(todo_id = %id, %owner, "todo deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_trimmed() {
        assert_eq!(validate_title("  buy milk  ").unwrap(), "buy milk");
    }

    #[test]
    fn empty_title_is_rejected() {
        assert!(matches!(
            validate_title("").unwrap_err(),
            AppError::Validation(_)
        ));
    }

    #[test]
    fn whitespace_only_title_is_rejected() {
        assert!(matches!(
            validate_title("   \t ").unwrap_err(),
            AppError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn create_rejects_empty_title_before_touching_db() {
        let state = AppState::fake();
        let err = create_todo(
            State(state),
            AuthUser(Uuid::new_v4()),
            AppJson(CreateTodoRequest { title: "  ".into() }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn update_rejects_empty_title_before_touching_db() {
        let state = AppState::fake();
        let err = update_todo(
            State(state),
            AuthUser(Uuid::new_v4()),
            Path(Uuid::new_v4()),
            AppJson(UpdateTodoRequest {
                title: Some("".into()),
                completed: None,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
