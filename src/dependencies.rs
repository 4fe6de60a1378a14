use anyhow::{bail, Context, Result};
use entrait::entrait;
use std::ffi::OsString;
use std::net::{SocketAddr, TcpStream};
use std::process::Command;
use std::time::Duration;

#[entrait(pub Environment, mock_api=EnvironmentMock)]
pub fn read_var(_deps: &impl std::any::Any, var: &str) -> Result<String> {
    let var_name = OsString::from(var);
    std::env::var(var_name).with_context(|| format!("Failed to read ${var} environment variable"))
}

// The second unused arg is a workaround so that we can match against command in mocks
// https://github.com/audunhalland/unimock/issues/40
#[entrait(pub Exec, mock_api=ExecMock)]
fn exec(_deps: &impl std::any::Any, command: &mut Command, _: &mut ()) -> Result<String> {
    let output = command
        .output()
        .with_context(|| format!("Failed to run command \"{command:?}\""))?;
    let status = output.status;
    if output.status.success() {
        return Ok(String::from_utf8_lossy(&output.stdout).into());
    }
    let exit_code = match status.code() {
        Some(code) => code.to_string(),
        None => String::from("unknown"),
    };
    let output = String::from_utf8_lossy(&output.stderr);
    bail!("Command \"{command:?}\" failed with exit code {exit_code} and output:\n{output}");
}

// A connection that succeeds means something is already listening on the port
#[entrait(pub ProbePort, mock_api=ProbePortMock)]
fn port_in_use(_deps: &impl std::any::Any, port: u16, timeout: Duration) -> bool {
    let address = SocketAddr::from(([127, 0, 0, 1], port));
    TcpStream::connect_timeout(&address, timeout).is_ok()
}
