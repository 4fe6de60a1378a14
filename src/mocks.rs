use crate::dependencies::{EnvironmentMock, ExecMock, ProbePortMock};
use anyhow::bail;
use std::collections::HashSet;
use unimock::{matching, Clause, MockFn};

// Respond to the compose ps invocation with the provided stdout, defaulting
// to the canned output of a running deployment
pub fn exec_compose_mock(stdout: Option<&str>) -> impl Clause {
    let stdout = stdout
        .unwrap_or(include_str!("fixtures/compose_ps.json"))
        .to_string();
    ExecMock
        .each_call(matching!((command, _) if command.get_program() == "docker"))
        .answers(move |_| Ok(stdout.clone()))
        .once()
}

// Simulate the compose binary being missing or erroring out
pub fn exec_failure_mock() -> impl Clause {
    ExecMock
        .each_call(matching!((command, _) if command.get_program() == "docker"))
        .answers(|_| bail!("docker: command not found"))
        .once()
}

// Port probe backed by an in-memory set of occupied ports
pub fn probe_mock(occupied: &[u16]) -> impl Clause {
    let occupied: HashSet<u16> = occupied.iter().copied().collect();
    ProbePortMock
        .each_call(matching!(_))
        .answers(move |(port, _)| occupied.contains(&port))
        .at_least_times(1)
}

// Environment without any override variables set
pub fn read_var_mock() -> impl Clause {
    EnvironmentMock
        .each_call(matching!(_))
        .answers(|_| bail!("Failed to read environment variable"))
        .at_least_times(1)
}
