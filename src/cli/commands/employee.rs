//! Employee CLI commands.

use anyhow::{Context, Result};
use clap::{ArgGroup, Args, Subcommand};
use std::sync::Arc;

use super::open_database;
use crate::adapters::cache::MokaEmployeeCache;
use crate::adapters::sqlite::SqliteEmployeeRepository;
use crate::cli::output::{list_table, output, render_list, CommandOutput};
use crate::domain::models::{Config, Employee, EmployeeDetails, EmployeePatch, EntityRef};
use crate::services::EmployeeService;

#[derive(Args, Debug)]
pub struct EmployeeArgs {
    #[command(subcommand)]
    pub command: EmployeeCommands,
}

#[derive(Subcommand, Debug)]
pub enum EmployeeCommands {
    /// List all employees
    List,
    /// Show employee details
    Show {
        /// Employee ID
        id: i64,
    },
    /// Create a new employee
    Create {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        department: String,
        #[arg(long)]
        position: String,
        /// Employer ID
        #[arg(long)]
        employer: Option<i64>,
        /// Skill IDs (repeatable or comma-separated)
        #[arg(long = "skill", value_delimiter = ',')]
        skills: Vec<i64>,
        /// Project IDs (repeatable or comma-separated)
        #[arg(long = "project", value_delimiter = ',')]
        projects: Vec<i64>,
    },
    /// Change selected fields of an employee
    Update {
        /// Employee ID
        id: i64,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        position: Option<String>,
        /// Employer ID
        #[arg(long)]
        employer: Option<i64>,
        /// Replace the skill list
        #[arg(long = "skill", value_delimiter = ',')]
        skills: Option<Vec<i64>>,
        /// Replace the project list
        #[arg(long = "project", value_delimiter = ',')]
        projects: Option<Vec<i64>>,
    },
    /// Delete an employee
    Delete {
        /// Employee ID
        id: i64,
    },
    /// Find employees by one attribute
    #[command(group(ArgGroup::new("filter").required(true).args(["email", "department", "employer"])))]
    Find {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        department: Option<String>,
        /// Employer ID
        #[arg(long)]
        employer: Option<i64>,
    },
}

#[derive(Debug, serde::Serialize)]
pub struct EmployeeListOutput {
    pub employees: Vec<Employee>,
    pub total: usize,
}

impl CommandOutput for EmployeeListOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["id", "name", "email", "department", "position", "employer"]);
        for e in &self.employees {
            table.add_row(vec![
                e.id.to_string(),
                e.full_name(),
                e.email.clone(),
                e.department.clone(),
                e.position.clone(),
                e.employer.as_ref().map(|er| er.name.clone()).unwrap_or_else(|| "-".to_string()),
            ]);
        }
        render_list("employee", &table, self.total)
    }
}

#[derive(Debug, serde::Serialize)]
pub struct EmployeeDetailOutput {
    pub employee: Employee,
}

impl CommandOutput for EmployeeDetailOutput {
    fn to_human(&self) -> String {
        let e = &self.employee;
        let mut lines = vec![
            format!("Employee: {}", e.full_name()),
            format!("ID: {}", e.id),
            format!("Email: {}", e.email),
            format!("Department: {}", e.department),
            format!("Position: {}", e.position),
        ];

        if let Some(employer) = &e.employer {
            lines.push(format!("Employer: {} ({})", employer.name, employer.id));
        }

        if !e.skills.is_empty() {
            lines.push("\nSkills:".to_string());
            for s in &e.skills {
                lines.push(format!("  - {} ({})", s.name, s.id));
            }
        }

        if !e.projects.is_empty() {
            lines.push("\nProjects:".to_string());
            for p in &e.projects {
                lines.push(format!("  - {} ({}) [{}]", p.name, p.id, p.status.as_str()));
            }
        }

        lines.push(format!("\nCreated: {}", e.created_at.to_rfc3339()));
        lines.push(format!("Updated: {}", e.updated_at.to_rfc3339()));
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.employee).unwrap_or_default()
    }
}

#[derive(Debug, serde::Serialize)]
pub struct EmployeeActionOutput {
    pub success: bool,
    pub message: String,
    pub employee: Option<Employee>,
}

impl CommandOutput for EmployeeActionOutput {
    fn to_human(&self) -> String {
        self.message.clone()
    }
}

pub async fn execute(args: EmployeeArgs, config: &Config, json_mode: bool) -> Result<()> {
    let pool = open_database(config)
        .await
        .context("Failed to initialize database. Run 'roster init' first.")?;

    let repo = Arc::new(SqliteEmployeeRepository::new(pool));
    let cache = Arc::new(MokaEmployeeCache::from_config(&config.cache));
    let service = EmployeeService::new(repo, cache);

    match args.command {
        EmployeeCommands::List => {
            let employees = service.list_employees().await?;
            let out = EmployeeListOutput {
                total: employees.len(),
                employees,
            };
            output(&out, json_mode);
        }

        EmployeeCommands::Show { id } => {
            let employee = service.get_employee(id).await?;
            output(&EmployeeDetailOutput { employee }, json_mode);
        }

        EmployeeCommands::Create {
            first_name,
            last_name,
            email,
            department,
            position,
            employer,
            skills,
            projects,
        } => {
            let mut details = EmployeeDetails::new(first_name, last_name, email, department, position);
            if let Some(employer_id) = employer {
                details = details.with_employer(employer_id);
            }
            for skill_id in skills {
                details = details.with_skill(skill_id);
            }
            for project_id in projects {
                details = details.with_project(project_id);
            }

            let employee = service.create_employee(details).await?;
            let out = EmployeeActionOutput {
                success: true,
                message: format!("Employee created: {}", employee.id),
                employee: Some(employee),
            };
            output(&out, json_mode);
        }

        EmployeeCommands::Update {
            id,
            first_name,
            last_name,
            email,
            department,
            position,
            employer,
            skills,
            projects,
        } => {
            let to_refs = |ids: Vec<i64>| -> Vec<EntityRef> { ids.into_iter().map(EntityRef::new).collect() };
            let patch = EmployeePatch {
                first_name,
                last_name,
                email,
                department,
                position,
                employer: employer.map(EntityRef::new),
                skills: skills.map(to_refs),
                projects: projects.map(to_refs),
            };
            if patch.is_empty() {
                anyhow::bail!("Nothing to update: pass at least one field flag");
            }

            let employee = service.patch_employee(id, Some(patch)).await?;
            let out = EmployeeActionOutput {
                success: true,
                message: format!("Employee updated: {}", employee.id),
                employee: Some(employee),
            };
            output(&out, json_mode);
        }

        EmployeeCommands::Delete { id } => {
            service.delete_employee(id).await?;
            let out = EmployeeActionOutput {
                success: true,
                message: format!("Employee deleted: {id}"),
                employee: None,
            };
            output(&out, json_mode);
        }

        EmployeeCommands::Find { email, department, employer } => {
            let employees = if let Some(email) = email {
                service.find_by_email(&email).await?.into_iter().collect()
            } else if let Some(department) = department {
                service.find_by_department(&department).await?
            } else if let Some(employer_id) = employer {
                service.find_by_employer(employer_id).await?
            } else {
                Vec::new()
            };

            let out = EmployeeListOutput {
                total: employees.len(),
                employees,
            };
            output(&out, json_mode);
        }
    }

    Ok(())
}
