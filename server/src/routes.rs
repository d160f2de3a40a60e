// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use crate::handlers;
use axum::{
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;

/// Creates and configures the application router.
pub fn create_router(pool: SqlitePool) -> Router {
    Router::new()
        // Associates the `GET /` route with the `health_check` handler
        .route("/", get(handlers::health_check))
        // Associates the `GET /tasks` route with the `list_tasks` handler
        .route("/tasks", get(handlers::list_tasks))
        // Associates the `POST /tasks` route with the `create_task` handler
        .route("/tasks", post(handlers::create_task))
        // Adds the database pool to the application state
        .with_state(pool)
}
