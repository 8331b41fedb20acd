//! Command-line interface for Roster.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{catalog::CatalogArgs, employee::EmployeeArgs, init::InitArgs, serve::ServeArgs};

#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(about = "Roster - employee records service", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this YAML file instead of .roster/
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize Roster configuration and database
    Init(InitArgs),
    /// Run the HTTP API server
    Serve(ServeArgs),
    /// Employee record commands
    Employee(EmployeeArgs),
    /// Employer, skill and project commands
    Catalog(CatalogArgs),
}

/// Print an error in the selected output mode and exit with status 1.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let body = serde_json::json!({
            "success": false,
            "error": format!("{err:#}"),
        });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use commands::employee::EmployeeCommands;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["roster", "employee", "show", "3", "--json"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Employee(args) => assert!(matches!(args.command, EmployeeCommands::Show { id: 3 })),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_find_accepts_only_one_filter() {
        assert!(Cli::try_parse_from(["roster", "employee", "find", "--department", "R&D"]).is_ok());
        assert!(Cli::try_parse_from([
            "roster", "employee", "find", "--department", "R&D", "--employer", "1"
        ])
        .is_err());
        assert!(Cli::try_parse_from(["roster", "employee", "find"]).is_err());
    }

    #[test]
    fn test_serve_overrides() {
        let cli = Cli::try_parse_from(["roster", "serve", "--port", "9000"]).unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, Some(9000));
                assert!(args.host.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
