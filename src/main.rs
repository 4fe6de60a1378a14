mod cli;
mod compose;
mod config;
mod dependencies;
mod error;
#[cfg(test)]
mod mocks;
mod ports;
mod scanner;

use crate::cli::Cli;
use crate::config::Config;
use crate::dependencies::{Environment, Exec, ProbePort};
use crate::error::{ApplicationError, Result};
use crate::ports::ServicePorts;
use clap::Parser;
use entrait::Impl;
use regex::Regex;
use std::process;

// Compose rejects project names outside of this shape, so catch them before
// shelling out
fn validate_project_name(name: &str) -> Result<()> {
    lazy_static::lazy_static! {
        static ref RE: Regex = Regex::new(r"^[a-z0-9][a-z0-9_-]*$").unwrap();
    }
    if RE.is_match(name) {
        Ok(())
    } else {
        Err(ApplicationError::InvalidProjectName(String::from(name)))
    }
}

// Prefer the ports that a running deployment of the project has already
// published, falling back to scanning for a free slot
fn resolve_ports(
    deps: &(impl Exec + ProbePort),
    config: &Config,
    project_name: &str,
) -> Result<ServicePorts> {
    if let Some(ports) = compose::resolve_running(deps, project_name) {
        return Ok(ports);
    }
    scanner::scan(deps, config)
}

fn run(deps: &(impl Environment + Exec + ProbePort)) -> Result<()> {
    let Cli { project_name } = Cli::parse();
    validate_project_name(&project_name)?;
    let config = Config::from_env(deps)?;
    let ports = resolve_ports(deps, &config, &project_name)?;
    println!("{ports}");
    Ok(())
}

fn main() {
    if let Err(err) = run(&Impl::new(())) {
        eprintln!("{err}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{exec_compose_mock, exec_failure_mock, probe_mock};
    use unimock::Unimock;

    #[test]
    fn test_valid_project_names() {
        assert!(validate_project_name("demo").is_ok());
        assert!(validate_project_name("my-app_2").is_ok());
        assert!(validate_project_name("0day").is_ok());
    }

    #[test]
    fn test_invalid_project_names() {
        for name in ["", "Demo", "-demo", "my app", "app!"] {
            assert!(matches!(
                validate_project_name(name),
                Err(ApplicationError::InvalidProjectName(invalid)) if invalid == name
            ));
        }
    }

    #[test]
    fn test_resolve_prefers_running_project() {
        // No probe mock is installed, so reaching the scanner would panic
        let deps = Unimock::new(exec_compose_mock(None));
        let ports = resolve_ports(&deps, &Config::default(), "demo").unwrap();
        assert_eq!(
            ports,
            ServicePorts {
                web: 3005,
                database: 3311,
                cache: 6384,
            }
        );
    }

    #[test]
    fn test_resolve_falls_back_to_scanning() {
        let deps = Unimock::new((exec_failure_mock(), probe_mock(&[])));
        let ports = resolve_ports(&deps, &Config::default(), "demo").unwrap();
        assert_eq!(
            ports,
            ServicePorts {
                web: 3000,
                database: 3306,
                cache: 6379,
            }
        );
    }

    #[test]
    fn test_resolve_falls_back_when_project_is_partial() {
        let stdout = r#"{"Service":"web","Publishers":[{"HostIp":"0.0.0.0","HostPort":"3005"}]}"#;
        let deps = Unimock::new((exec_compose_mock(Some(stdout)), probe_mock(&[])));
        let ports = resolve_ports(&deps, &Config::default(), "demo").unwrap();
        assert_eq!(
            ports,
            ServicePorts {
                web: 3000,
                database: 3306,
                cache: 6379,
            }
        );
    }
}
