use clap::Parser;

#[derive(Parser)]
#[command(
    name = "portslot",
    about = "Allocate a consistent set of host ports for a Docker Compose project",
    version
)]
pub struct Cli {
    /// Name of the compose project to resolve ports for
    pub project_name: String,
}
