// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Represents a task record as persisted in the database.
///
/// Derivation attributes (derive):
/// - `Serialize`, `Deserialize`: Allows conversion to/from JSON.
/// - `Debug`: Enables displaying the structure for debugging (e.g., `println!("{:?}", task)`).
/// - `Clone`: Allows creating copies of the object.
/// - `sqlx::FromRow`: Allows `sqlx` to create a `Task` instance directly
///   from a database result row.
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Task {
    #[sqlx(rename = "id")]
    pub id: i64,

    #[sqlx(rename = "owner")]
    pub owner: String,

    // Nullable in the schema; a task may be created without one.
    #[sqlx(rename = "description")]
    pub description: Option<String>,

    #[sqlx(rename = "completed")]
    pub completed: bool,

    // Assigned once at insert time, never updated afterwards.
    #[sqlx(rename = "created_at")]
    pub created_at: DateTime<Utc>,
}

/// The normalized result of validating a creation request.
/// It's a good practice to separate database models (`Task`)
/// from API models (`NewTask`), as they may have different fields.
/// `id`, `completed` and `created_at` are supplied by the persistence
/// layer at insert time, so they do not appear here.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub owner: String,
    pub description: Option<String>,
}

/// The outbound representation of a persisted task.
///
/// Exposes exactly `id`, `owner`, `description`, `completed` and
/// `created_at`; nothing internal leaks into the response.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TaskResponse {
    pub id: i64,
    pub owner: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            owner: task.owner,
            description: task.description,
            completed: task.completed,
            created_at: task.created_at,
        }
    }
}

/// A creation payload failed the creation schema.
///
/// This is a client error, distinct from any persistence failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("request body must be a JSON object")]
    NotAnObject,

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' must be a {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },
}

/// Validates an untyped creation payload against the creation schema.
///
/// `owner` must be present and be a string. `description`, if present,
/// must be a string; absent or `null` normalizes to `None`. Any other
/// fields in the payload are discarded.
pub fn validate_creation_request(payload: &Value) -> Result<NewTask, ValidationError> {
    let object = payload.as_object().ok_or(ValidationError::NotAnObject)?;

    let owner = match object.get("owner") {
        Some(Value::String(owner)) => owner.clone(),
        Some(_) => {
            return Err(ValidationError::InvalidType {
                field: "owner",
                expected: "string",
            })
        }
        None => return Err(ValidationError::MissingField("owner")),
    };

    let description = match object.get("description") {
        Some(Value::String(description)) => Some(description.clone()),
        Some(Value::Null) | None => None,
        Some(_) => {
            return Err(ValidationError::InvalidType {
                field: "description",
                expected: "string",
            })
        }
    };

    Ok(NewTask { owner, description })
}
