// Project Domain Model

use super::error::{check_length, require_name, Result, MAX_DESCRIPTION_CHARS};
use serde::{Deserialize, Serialize};

/// Project ID (assigned by the repository)
pub type ProjectId = i64;

/// Opaque caller identity, authenticated upstream
pub type OwnerId = String;

/// Project Entity
///
/// `owner_id` is fixed at creation; ownership is never transferred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub owner_id: OwnerId,
    pub name: String,
    pub description: String,
    pub created_at: i64, // epoch ms
}

impl Project {
    /// Materialize a persisted project from its validated draft
    pub fn from_new(id: ProjectId, new: NewProject) -> Self {
        Self {
            id,
            owner_id: new.owner_id,
            name: new.name,
            description: new.description,
            created_at: new.created_at,
        }
    }

    /// Whether `owner_id` may see this project
    pub fn is_owned_by(&self, owner_id: &str) -> bool {
        self.owner_id == owner_id
    }
}

/// Validated project draft, not yet persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub owner_id: OwnerId,
    pub name: String,
    pub description: String,
    pub created_at: i64,
}

impl NewProject {
    /// Create a new project draft
    ///
    /// # Arguments
    ///
    /// * `owner_id` - Creating caller (not validated, opaque)
    /// * `name` - Required, trimmed non-empty
    /// * `description` - Free text
    /// * `created_at` - Creation timestamp in epoch ms (injected)
    pub fn new(
        owner_id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        created_at: i64,
    ) -> Result<Self> {
        let name = name.into();
        let description = description.into();

        require_name("name", &name)?;
        check_length("description", &description, MAX_DESCRIPTION_CHARS)?;

        Ok(Self {
            owner_id: owner_id.into(),
            name: name.trim().to_string(),
            description,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn test_new_project_trims_name() {
        let draft = NewProject::new("u1", "  P1  ", "", 1000).unwrap();
        assert_eq!(draft.name, "P1");
        assert_eq!(draft.owner_id, "u1");
    }

    #[test]
    fn test_new_project_rejects_blank_name() {
        let err = NewProject::new("u1", "   ", "desc", 1000).unwrap_err();
        assert!(matches!(err, DomainError::InvalidField { field: "name", .. }));
    }

    #[test]
    fn test_new_project_rejects_long_name() {
        let err = NewProject::new("u1", "a".repeat(201), "", 1000).unwrap_err();
        assert!(err.to_string().contains("too long"));
    }

    #[test]
    fn test_ownership_check() {
        let project = Project::from_new(1, NewProject::new("u1", "P1", "", 0).unwrap());
        assert!(project.is_owned_by("u1"));
        assert!(!project.is_owned_by("u2"));
    }
}
