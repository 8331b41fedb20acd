//! Employee domain model.
//!
//! An [`Employee`] is what the store hands back: it carries the store-assigned
//! id, both timestamps and resolved catalog summaries. Callers never build one
//! directly; they submit [`EmployeeDetails`] (full replacement) or an
//! [`EmployeePatch`] (field merge) and the store stamps the rest.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::catalog::{Employer, ProjectSummary, Skill};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
});

/// A persisted employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub position: String,
    pub employer: Option<Employer>,
    pub skills: Vec<Skill>,
    pub projects: Vec<ProjectSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    /// Full display name, "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// The caller-editable part of this record, with catalog links reduced to ids.
    pub fn to_details(&self) -> EmployeeDetails {
        EmployeeDetails {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            department: self.department.clone(),
            position: self.position.clone(),
            employer: self.employer.as_ref().map(|e| EntityRef::new(e.id)),
            skills: self.skills.iter().map(|s| EntityRef::new(s.id)).collect(),
            projects: self.projects.iter().map(|p| EntityRef::new(p.id)).collect(),
        }
    }
}

/// Reference to a catalog entity by id.
///
/// Extra fields are ignored on input, so the `{id, name}` objects a read
/// returns can be posted back unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: i64,
}

impl EntityRef {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

/// Caller-supplied fields of an employee, used for create and full update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub position: String,
    #[serde(default)]
    pub employer: Option<EntityRef>,
    #[serde(default)]
    pub skills: Vec<EntityRef>,
    #[serde(default)]
    pub projects: Vec<EntityRef>,
}

impl EmployeeDetails {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        department: impl Into<String>,
        position: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            department: department.into(),
            position: position.into(),
            employer: None,
            skills: Vec::new(),
            projects: Vec::new(),
        }
    }

    pub fn with_employer(mut self, employer_id: i64) -> Self {
        self.employer = Some(EntityRef::new(employer_id));
        self
    }

    pub fn with_skill(mut self, skill_id: i64) -> Self {
        self.skills.push(EntityRef::new(skill_id));
        self
    }

    pub fn with_project(mut self, project_id: i64) -> Self {
        self.projects.push(EntityRef::new(project_id));
        self
    }

    /// Check required fields and the email shape.
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("email", &self.email),
            ("department", &self.department),
            ("position", &self.position),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(format!("{field} cannot be blank"));
            }
        }

        if !EMAIL_PATTERN.is_match(&self.email) {
            return Err(format!("email '{}' is not a valid address", self.email));
        }

        Ok(())
    }
}

/// Partial update: only the fields that are present get applied.
///
/// A present `skills` or `projects` list replaces the current one, so an
/// explicit empty list clears it. The employer can be changed but not cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePatch {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub employer: Option<EntityRef>,
    #[serde(default)]
    pub skills: Option<Vec<EntityRef>>,
    #[serde(default)]
    pub projects: Option<Vec<EntityRef>>,
}

impl EmployeePatch {
    /// Merge this patch over `current`.
    pub fn apply_to(self, mut current: EmployeeDetails) -> EmployeeDetails {
        if let Some(first_name) = self.first_name {
            current.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            current.last_name = last_name;
        }
        if let Some(email) = self.email {
            current.email = email;
        }
        if let Some(department) = self.department {
            current.department = department;
        }
        if let Some(position) = self.position {
            current.position = position;
        }
        if let Some(employer) = self.employer {
            current.employer = Some(employer);
        }
        if let Some(skills) = self.skills {
            current.skills = skills;
        }
        if let Some(projects) = self.projects {
            current.projects = projects;
        }
        current
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> EmployeeDetails {
        EmployeeDetails::new("Ada", "Lovelace", "ada@example.com", "Engineering", "Analyst")
    }

    #[test]
    fn test_valid_details() {
        assert!(details().validate().is_ok());
    }

    #[test]
    fn test_blank_field_rejected() {
        let mut d = details();
        d.department = "   ".to_string();
        let err = d.validate().unwrap_err();
        assert!(err.contains("department"));
    }

    #[test]
    fn test_bad_email_rejected() {
        for email in ["ada", "ada@", "@example.com", "ada@example", "a da@example.com"] {
            let mut d = details();
            d.email = email.to_string();
            assert!(d.validate().is_err(), "{email} should be rejected");
        }
    }

    #[test]
    fn test_details_deserialize_camel_case() {
        let json = r#"{
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "department": "Engineering",
            "position": "Analyst",
            "employer": {"id": 3, "name": "Analytical Engines Ltd"},
            "skills": [{"id": 1}, {"id": 2}]
        }"#;
        let d: EmployeeDetails = serde_json::from_str(json).unwrap();
        assert_eq!(d.first_name, "Ada");
        assert_eq!(d.employer, Some(EntityRef::new(3)));
        assert_eq!(d.skills.len(), 2);
        assert!(d.projects.is_empty());
    }

    #[test]
    fn test_details_missing_required_field() {
        let json = r#"{"firstName": "Ada", "lastName": "Lovelace"}"#;
        assert!(serde_json::from_str::<EmployeeDetails>(json).is_err());
    }

    #[test]
    fn test_patch_merges_present_fields_only() {
        let base = details().with_employer(1).with_skill(5);
        let patch = EmployeePatch {
            position: Some("Lead Analyst".to_string()),
            projects: Some(vec![EntityRef::new(9)]),
            ..Default::default()
        };

        let merged = patch.apply_to(base.clone());
        assert_eq!(merged.position, "Lead Analyst");
        assert_eq!(merged.first_name, base.first_name);
        assert_eq!(merged.employer, Some(EntityRef::new(1)));
        assert_eq!(merged.skills, vec![EntityRef::new(5)]);
        assert_eq!(merged.projects, vec![EntityRef::new(9)]);
    }

    #[test]
    fn test_patch_empty_list_clears() {
        let base = details().with_skill(5);
        let patch = EmployeePatch {
            skills: Some(vec![]),
            ..Default::default()
        };
        assert!(patch.apply_to(base).skills.is_empty());
    }

    #[test]
    fn test_empty_patch() {
        assert!(EmployeePatch::default().is_empty());
        let patch: EmployeePatch = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_employee_serializes_camel_case() {
        let now = Utc::now();
        let employee = Employee {
            id: 1,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            department: "Engineering".to_string(),
            position: "Analyst".to_string(),
            employer: None,
            skills: vec![],
            projects: vec![],
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&employee).unwrap();
        for key in [
            "id", "firstName", "lastName", "email", "department", "position", "employer",
            "skills", "projects", "createdAt", "updatedAt",
        ] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(employee.full_name(), "Ada Lovelace");
        assert_eq!(employee.to_details().email, "ada@example.com");
    }
}
