// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use anyhow::{Context, Result};
use chrono::Utc;
use common::{NewTask, Task};
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool}; // Added MigrateDatabase for database_exists/create_database
use tracing::{debug, info};

/// Establishes the database connection pool.
/// If the database does not exist, it creates it.
/// It also ensures the `tasks` table has the correct schema.
pub async fn establish_connection_pool(database_url: &str) -> Result<SqlitePool> {
    if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
        info!("Creating database {}", database_url);
        Sqlite::create_database(database_url)
            .await
            .context("Failed to create database")?;
    } else {
        info!("Database already exists.");
    }

    let pool = SqlitePool::connect(database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner TEXT NOT NULL,
            description TEXT NULL,
            completed BOOLEAN NOT NULL DEFAULT 0,
            created_at TIMESTAMP NOT NULL
        );
        "#,
    )
    .execute(&pool)
    .await
    .context("Failed to create 'tasks' table")?;

    info!("'tasks' table is ready.");

    Ok(pool)
}

/// Retrieves all tasks in insertion order.
pub async fn list_tasks_from_db(pool: &SqlitePool) -> Result<Vec<Task>> {
    let tasks = sqlx::query_as::<_, Task>("SELECT * FROM tasks ORDER BY id ASC;")
        .fetch_all(pool)
        .await
        .context("Failed to retrieve tasks from DB")?;

    Ok(tasks)
}

/// Inserts a new task into the database.
///
/// `completed` starts as false and `created_at` is stamped here, exactly
/// once; neither is supplied by the caller.
pub async fn create_task_in_db(pool: &SqlitePool, new_task: NewTask) -> Result<Task> {
    let created_at = Utc::now();

    debug!(
        "Insert values: owner={}, description={:?}, created_at={}",
        new_task.owner, new_task.description, created_at
    );

    let id = sqlx::query(
        "INSERT INTO tasks (owner, description, completed, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(&new_task.owner)
    .bind(&new_task.description)
    .bind(false)
    .bind(created_at)
    .execute(pool)
    .await
    .context("Failed to insert task into DB")?
    .last_insert_rowid();

    let task = Task {
        id,
        owner: new_task.owner,
        description: new_task.description,
        completed: false,
        created_at,
    };

    Ok(task)
}
