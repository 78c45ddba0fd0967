// SQLite ProjectRepository Implementation

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use sqlx::SqlitePool;
use taskboard_core::domain::{NewProject, Project, ProjectId};
use taskboard_core::error::Result;
use taskboard_core::port::ProjectRepository;

pub struct SqliteProjectRepository {
    pool: SqlitePool,
}

impl SqliteProjectRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqliteProjectRepository {
    async fn create(&self, project: NewProject) -> Result<Project> {
        let result = sqlx::query(
            r#"
            INSERT INTO projects (owner_id, name, description, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&project.owner_id)
        .bind(&project.name)
        .bind(&project.description)
        .bind(project.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(Project::from_new(result.last_insert_rowid(), project))
    }

    async fn get_by_id(&self, id: ProjectId) -> Result<Option<Project>> {
        let row = sqlx::query_as::<_, ProjectRow>("SELECT * FROM projects WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(ProjectRow::into_project))
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Project>> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            "SELECT * FROM projects WHERE owner_id = ? ORDER BY id ASC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(ProjectRow::into_project).collect())
    }
}

/// SQLite row representation
#[derive(Debug, sqlx::FromRow)]
struct ProjectRow {
    id: i64,
    owner_id: String,
    name: String,
    description: String,
    created_at: i64,
}

impl ProjectRow {
    fn into_project(self) -> Project {
        Project {
            id: self.id,
            owner_id: self.owner_id,
            name: self.name,
            description: self.description,
            created_at: self.created_at,
        }
    }
}
