use crate::dependencies::Exec;
use crate::ports::{Service, ServicePorts};
use serde::Deserialize;
use serde_json::Value;
use std::process::Command;

// The subset of the fields that `docker compose ps --format json` emits for
// each container
#[derive(Deserialize)]
struct PsRecord {
    #[serde(rename = "Service")]
    service: String,
    #[serde(rename = "Publishers")]
    publishers: Option<Vec<Publisher>>,
}

#[derive(Deserialize)]
struct Publisher {
    #[serde(rename = "HostPort")]
    host_port: Option<Value>,
}

impl Publisher {
    // Host ports arrive as strings from some compose versions and as numbers
    // from others
    fn host_port(&self) -> Option<u16> {
        match &self.host_port {
            Some(Value::String(port)) => port.parse().ok(),
            Some(Value::Number(port)) => port.as_u64().and_then(|port| u16::try_from(port).ok()),
            _ => None,
        }
    }
}

// The host ports collected so far while walking the container records
#[derive(Default)]
struct PartialPorts {
    web: Option<u16>,
    database: Option<u16>,
    cache: Option<u16>,
}

impl PartialPorts {
    fn set(&mut self, service: Service, port: u16) {
        match service {
            Service::Web => self.web = Some(port),
            Service::Database => self.database = Some(port),
            Service::Cache => self.cache = Some(port),
        }
    }

    // A port set is only usable once every role has one
    fn complete(self) -> Option<ServicePorts> {
        Some(ServicePorts {
            web: self.web?,
            database: self.database?,
            cache: self.cache?,
        })
    }
}

// Extract the host ports already published by a running deployment of the
// project, or None if the project isn't running
// Failures to invoke compose are treated as the project not running rather
// than propagated
pub fn resolve_running(deps: &impl Exec, project_name: &str) -> Option<ServicePorts> {
    let stdout = deps
        .exec(
            Command::new("docker").args(["compose", "-p", project_name, "ps", "--format", "json"]),
            &mut (),
        )
        .ok()?;
    if stdout.trim().is_empty() {
        return None;
    }

    let mut found = PartialPorts::default();
    for line in stdout.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        for record in parse_records(line) {
            let Ok(record) = serde_json::from_value::<PsRecord>(record) else {
                continue;
            };
            let Some(service) = Service::from_label(&record.service) else {
                continue;
            };
            let Some(publishers) = record.publishers else {
                continue;
            };
            for publisher in publishers {
                if let Some(port) = publisher.host_port() {
                    found.set(service, port);
                }
            }
        }
    }
    found.complete()
}

// Each line holds one record, several concatenated records, or an array of
// records, depending on the compose version
// A line that fails to parse contributes nothing and never aborts the others
fn parse_records(line: &str) -> Vec<Value> {
    let mut records = Vec::new();
    for value in serde_json::Deserializer::from_str(line).into_iter::<Value>() {
        match value {
            Ok(Value::Array(items)) => records.extend(items),
            Ok(value) => records.push(value),
            Err(_) => break,
        }
    }
    records
}
