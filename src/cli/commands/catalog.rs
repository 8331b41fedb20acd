//! Catalog CLI commands: employers, skills and projects.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Subcommand};
use std::sync::Arc;

use super::open_database;
use crate::adapters::sqlite::SqliteCatalogRepository;
use crate::cli::output::{list_table, output, render_list, truncate, CommandOutput};
use crate::domain::models::{Config, Employer, NewCatalogEntry, NewProject, Project, ProjectStatus, Skill};
use crate::services::CatalogService;

#[derive(Args, Debug)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// List employers
    Employers,
    /// List skills
    Skills,
    /// List projects
    Projects,
    /// Add an employer
    AddEmployer {
        name: String,
    },
    /// Add a skill
    AddSkill {
        name: String,
    },
    /// Add a project
    AddProject {
        name: String,
        #[arg(short, long)]
        description: Option<String>,
        /// Start date (YYYY-MM-DD or RFC 3339); defaults to now
        #[arg(long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        end: Option<String>,
        /// Status (planned, in_progress, completed, on_hold, cancelled)
        #[arg(short, long, default_value = "planned")]
        status: String,
    },
}

#[derive(Debug, serde::Serialize)]
#[serde(untagged)]
pub enum CatalogListOutput {
    Employers(Vec<Employer>),
    Skills(Vec<Skill>),
    Projects(Vec<Project>),
}

impl CommandOutput for CatalogListOutput {
    fn to_human(&self) -> String {
        match self {
            Self::Employers(employers) => {
                let mut table = list_table(&["id", "name"]);
                for e in employers {
                    table.add_row(vec![e.id.to_string(), e.name.clone()]);
                }
                render_list("employer", &table, employers.len())
            }
            Self::Skills(skills) => {
                let mut table = list_table(&["id", "name"]);
                for s in skills {
                    table.add_row(vec![s.id.to_string(), s.name.clone()]);
                }
                render_list("skill", &table, skills.len())
            }
            Self::Projects(projects) => {
                let mut table = list_table(&["id", "name", "status", "start", "end", "description"]);
                for p in projects {
                    table.add_row(vec![
                        p.id.to_string(),
                        p.name.clone(),
                        p.status.as_str().to_string(),
                        p.start_date.format("%Y-%m-%d").to_string(),
                        p.end_date.map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string()),
                        truncate(p.description.as_deref().unwrap_or(""), 40),
                    ]);
                }
                render_list("project", &table, projects.len())
            }
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct CatalogActionOutput {
    pub success: bool,
    pub message: String,
    pub id: i64,
}

impl CommandOutput for CatalogActionOutput {
    fn to_human(&self) -> String {
        self.message.clone()
    }
}

/// Accept a bare date (midnight UTC) or a full RFC 3339 timestamp.
fn parse_date(input: &str) -> Result<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc());
    }
    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("Invalid date '{input}': expected YYYY-MM-DD or RFC 3339"))
}

pub async fn execute(args: CatalogArgs, config: &Config, json_mode: bool) -> Result<()> {
    let pool = open_database(config)
        .await
        .context("Failed to initialize database. Run 'roster init' first.")?;
    let service = CatalogService::new(Arc::new(SqliteCatalogRepository::new(pool)));

    match args.command {
        CatalogCommands::Employers => {
            output(&CatalogListOutput::Employers(service.list_employers().await?), json_mode);
        }
        CatalogCommands::Skills => {
            output(&CatalogListOutput::Skills(service.list_skills().await?), json_mode);
        }
        CatalogCommands::Projects => {
            output(&CatalogListOutput::Projects(service.list_projects().await?), json_mode);
        }

        CatalogCommands::AddEmployer { name } => {
            let employer = service.create_employer(NewCatalogEntry::new(name)).await?;
            let out = CatalogActionOutput {
                success: true,
                message: format!("Employer created: {} ({})", employer.name, employer.id),
                id: employer.id,
            };
            output(&out, json_mode);
        }

        CatalogCommands::AddSkill { name } => {
            let skill = service.create_skill(NewCatalogEntry::new(name)).await?;
            let out = CatalogActionOutput {
                success: true,
                message: format!("Skill created: {} ({})", skill.name, skill.id),
                id: skill.id,
            };
            output(&out, json_mode);
        }

        CatalogCommands::AddProject { name, description, start, end, status } => {
            let status = ProjectStatus::from_str(&status)
                .ok_or_else(|| anyhow::anyhow!("Invalid status: {status}"))?;
            let start_date = start.as_deref().map(parse_date).transpose()?.unwrap_or_else(Utc::now);

            let mut project = NewProject::new(name, start_date).with_status(status);
            project.description = description;
            if let Some(end) = end.as_deref() {
                project = project.with_end_date(parse_date(end)?);
            }

            let project = service.create_project(project).await?;
            let out = CatalogActionOutput {
                success: true,
                message: format!("Project created: {} ({})", project.name, project.id),
                id: project.id,
            };
            output(&out, json_mode);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_date_accepts_both_forms() {
        let day = parse_date("2024-03-15").unwrap();
        assert_eq!((day.year(), day.month(), day.day(), day.hour()), (2024, 3, 15, 0));

        let ts = parse_date("2024-03-15T10:30:00+02:00").unwrap();
        assert_eq!(ts.hour(), 8);

        assert!(parse_date("15/03/2024").is_err());
    }
}
