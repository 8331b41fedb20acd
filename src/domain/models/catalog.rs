//! Catalog entities employees point at: employers, skills and projects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An organisation employees can belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employer {
    pub id: i64,
    pub name: String,
}

/// A named skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: i64,
    pub name: String,
}

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Planned,
    InProgress,
    Completed,
    OnHold,
    Cancelled,
}

impl Default for ProjectStatus {
    fn default() -> Self {
        Self::Planned
    }
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::OnHold => "on_hold",
            Self::Cancelled => "cancelled",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "planned" => Some(Self::Planned),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "on_hold" => Some(Self::OnHold),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// A project with its schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn summary(&self) -> ProjectSummary {
        ProjectSummary {
            id: self.id,
            name: self.name.clone(),
            status: self.status,
        }
    }
}

/// The slice of a project embedded in an employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: i64,
    pub name: String,
    pub status: ProjectStatus,
}

/// Payload for creating an employer or a skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCatalogEntry {
    pub name: String,
}

impl NewCatalogEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name cannot be blank".to_string());
        }
        Ok(())
    }
}

/// Payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: ProjectStatus,
}

impl NewProject {
    pub fn new(name: impl Into<String>, start_date: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            description: None,
            start_date,
            end_date: None,
            status: ProjectStatus::default(),
        }
    }

    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_end_date(mut self, end_date: DateTime<Utc>) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name cannot be blank".to_string());
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err("endDate cannot precede startDate".to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_project_status_round_trip() {
        for status in [
            ProjectStatus::Planned,
            ProjectStatus::InProgress,
            ProjectStatus::Completed,
            ProjectStatus::OnHold,
            ProjectStatus::Cancelled,
        ] {
            assert_eq!(ProjectStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(ProjectStatus::from_str("IN_PROGRESS"), Some(ProjectStatus::InProgress));
        assert_eq!(ProjectStatus::from_str("shipped"), None);
    }

    #[test]
    fn test_new_project_dates_validated() {
        let start = Utc::now();
        let ok = NewProject::new("Apollo", start).with_end_date(start + Duration::days(30));
        assert!(ok.validate().is_ok());

        let bad = NewProject::new("Apollo", start).with_end_date(start - Duration::days(1));
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_new_project_defaults_to_planned() {
        let json = r#"{"name": "Apollo", "startDate": "2024-01-01T00:00:00Z"}"#;
        let project: NewProject = serde_json::from_str(json).unwrap();
        assert_eq!(project.status, ProjectStatus::Planned);
        assert!(project.end_date.is_none());
    }

    #[test]
    fn test_blank_catalog_name_rejected() {
        assert!(NewCatalogEntry::new("  ").validate().is_err());
        assert!(NewCatalogEntry::new("Rust").validate().is_ok());
    }
}
