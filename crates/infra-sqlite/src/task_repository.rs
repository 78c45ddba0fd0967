// SQLite TaskRepository Implementation

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use sqlx::SqlitePool;
use taskboard_core::domain::{NewTask, Task, TaskId, TaskStatus};
use taskboard_core::error::{AppError, Result};
use taskboard_core::port::{TaskFilter, TaskRepository};
use tracing::error;

pub struct SqliteTaskRepository {
    pool: SqlitePool,
}

impl SqliteTaskRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn create(&self, task: NewTask) -> Result<Task> {
        let result = sqlx::query(
            r#"
            INSERT INTO tasks (
                project_id, owner_id, title, description, status, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(task.project_id)
        .bind(&task.owner_id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(task.created_at)
        .bind(task.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(Task::from_new(result.last_insert_rowid(), task))
    }

    async fn get_by_id(&self, id: TaskId) -> Result<Option<Task>> {
        let row = sqlx::query_as::<_, TaskRow>("SELECT * FROM tasks WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.map(Task::try_from).transpose()
    }

    async fn list_by_owner(&self, owner_id: &str, filter: TaskFilter) -> Result<Vec<Task>> {
        let rows = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT * FROM tasks
            WHERE owner_id = ?
              AND (? IS NULL OR project_id = ?)
            ORDER BY id ASC
            "#,
        )
        .bind(owner_id)
        .bind(filter.project_id)
        .bind(filter.project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(Task::try_from).collect()
    }

    async fn update(&self, task: Task) -> Result<Task> {
        // project_id is deliberately not part of the SET clause
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET title = ?, description = ?, status = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(task.updated_at)
        .bind(task.id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found_task(task.id));
        }

        Ok(task)
    }
}

/// SQLite row representation
#[derive(Debug, sqlx::FromRow)]
struct TaskRow {
    id: i64,
    project_id: i64,
    owner_id: String,
    title: String,
    description: String,
    status: String,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<TaskRow> for Task {
    type Error = AppError;

    /// Unknown stored statuses are reported, never coerced
    fn try_from(row: TaskRow) -> Result<Self> {
        let status = row.status.parse::<TaskStatus>().map_err(|e| {
            error!(task_id = row.id, status = %row.status, "Corrupt task row");
            AppError::Persistence(format!("task {}: {}", row.id, e))
        })?;

        Ok(Task {
            id: row.id,
            project_id: row.project_id,
            owner_id: row.owner_id,
            title: row.title,
            description: row.description,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
