use crate::config::Config;
use crate::dependencies::ProbePort;
use crate::error::{ApplicationError, Result};
use crate::ports::ServicePorts;

// Find the lowest offset at which all three derived ports are simultaneously
// free, checking offsets in ascending order
pub fn scan(deps: &impl ProbePort, config: &Config) -> Result<ServicePorts> {
    for offset in 0..config.max_slots {
        let Some(candidate) = candidate_at(config, offset) else {
            // The slot ran past the end of the port range and later offsets
            // only grow, so the scan is over
            break;
        };
        if candidate
            .iter()
            .all(|port| !deps.port_in_use(port, config.probe_timeout))
        {
            return Ok(candidate);
        }
    }
    Err(ApplicationError::SlotsExhausted(config.max_slots))
}

// Derive the candidate port set for a slot offset
// None if any of the three ports would overflow the port range
fn candidate_at(config: &Config, offset: u16) -> Option<ServicePorts> {
    Some(ServicePorts {
        web: config.base_web_port.checked_add(offset)?,
        database: config.base_database_port.checked_add(offset)?,
        cache: config.base_cache_port.checked_add(offset)?,
    })
}
