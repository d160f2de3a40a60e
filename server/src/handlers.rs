// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use crate::database;
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::{validate_creation_request, TaskResponse, ValidationError};
use sqlx::SqlitePool;
use tracing::{debug, error, info};

/// Handler for the liveness probe.
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "App is working" }))
}

/// Handler for listing all tasks in insertion order.
pub async fn list_tasks(
    State(pool): State<SqlitePool>, // State injection (DB pool)
) -> Result<Json<Vec<TaskResponse>>, AppError> {
    let tasks = database::list_tasks_from_db(&pool).await?;
    info!("Successfully retrieved {} tasks.", tasks.len());
    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// Handler for creating a new task.
///
/// The body is extracted as an untyped JSON value so that schema failures
/// go through our own validation and come back as 422, not as a framework
/// deserialization rejection.
pub async fn create_task(
    State(pool): State<SqlitePool>,
    Json(payload): Json<serde_json::Value>, // Extracting the request body as JSON
) -> Result<(StatusCode, Json<TaskResponse>), AppError> {
    debug!("Received request to create a task.");

    let new_task = validate_creation_request(&payload)?;

    let task = database::create_task_in_db(&pool, new_task).await?;

    info!("Task created successfully with ID: {}", task.id);

    // Return a 201 Created status with the new task as JSON.
    Ok((StatusCode::CREATED, Json(TaskResponse::from(task))))
}

// --- Custom Error Handling ---
// This is a good practice for transforming our internal errors
// (e.g., from the database) into appropriate HTTP responses.

/// Our custom error type for the application.
pub struct AppError {
    code: StatusCode,
    message: String,
}

/// Allows converting a `ValidationError` (coming from `common`) into our
/// `AppError`. A bad payload is the client's fault, so this maps to 422.
impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        error!("Validation failed: {}", err);
        Self {
            code: StatusCode::UNPROCESSABLE_ENTITY,
            message: err.to_string(),
        }
    }
}

/// Allows converting an `anyhow::Error` (coming from `database.rs`)
/// into our `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        // Log the internal error for debugging.
        tracing::error!("Internal server error: {:?}", err);
        Self {
            code: StatusCode::INTERNAL_SERVER_ERROR,
            message: "An internal error occurred.".to_string(),
        }
    }
}

/// Allows Axum to convert our `AppError` into an HTTP `Response`.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(
            "Responding with error: status_code={}, message={}",
            self.code.as_u16(),
            self.message
        );
        (
            self.code,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sqlx::SqlitePool;

    #[tokio::test]
    async fn test_create_task_missing_owner_is_client_error() {
        // Arrange
        // Validation fails before any DB access, so an empty pool is fine.
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        let payload = Json(json!({ "description": "A valid description" }));

        // Act
        let result = create_task(State(pool), payload).await;

        // Assert
        assert!(result.is_err());
        let err = result.err().unwrap();
        assert_eq!(err.code, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.message, "missing required field 'owner'");
    }

    #[tokio::test]
    async fn test_create_task_mistyped_owner_is_client_error() {
        // Arrange
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        let payload = Json(json!({ "owner": ["not", "a", "string"] }));

        // Act
        let result = create_task(State(pool), payload).await;

        // Assert
        assert!(result.is_err());
        let err = result.err().unwrap();
        assert_eq!(err.code, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.message, "field 'owner' must be a string");
    }

    #[tokio::test]
    async fn test_health_check_message() {
        let Json(body) = health_check().await;
        assert_eq!(body, json!({ "message": "App is working" }));
    }
}
