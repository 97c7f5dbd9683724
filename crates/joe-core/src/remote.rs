//! Simulated remote zone operations
//!
//! The list and deploy commands are simulations: no connection to a DNS
//! server is made. This module supplies the fixture inventory and the
//! deployment step plan the commands narrate.

use tracing::debug;

/// Zone lifecycle state on the remote server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneStatus {
    Active,
    Inactive,
}

impl std::fmt::Display for ZoneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZoneStatus::Active => write!(f, "Active"),
            ZoneStatus::Inactive => write!(f, "Inactive"),
        }
    }
}

/// One zone as reported by the (simulated) remote server
#[derive(Debug, Clone)]
pub struct RemoteZone {
    pub domain: String,
    pub serial: String,
    pub modified: String,
    pub status: ZoneStatus,
}

impl RemoteZone {
    fn new(domain: &str, serial: &str, modified: &str, status: ZoneStatus) -> Self {
        Self {
            domain: domain.to_string(),
            serial: serial.to_string(),
            modified: modified.to_string(),
            status,
        }
    }
}

/// Fetch the simulated zone inventory, optionally filtered by a domain
/// name substring.
pub fn simulated_zones(filter: Option<&str>) -> Vec<RemoteZone> {
    debug!("Listing simulated zones (filter: {:?})", filter);

    let zones = vec![
        RemoteZone::new("example.com", "2023060101", "2023-06-01 10:15:22", ZoneStatus::Active),
        RemoteZone::new("example.org", "2023060201", "2023-06-02 14:30:45", ZoneStatus::Active),
        RemoteZone::new("example.net", "2023060301", "2023-06-03 09:22:18", ZoneStatus::Active),
        RemoteZone::new("test.com", "2023060401", "2023-06-04 16:45:33", ZoneStatus::Inactive),
        RemoteZone::new("dev.example.com", "2023060501", "2023-06-05 11:10:05", ZoneStatus::Active),
    ];

    match filter {
        Some(pattern) => zones
            .into_iter()
            .filter(|z| z.domain.contains(pattern))
            .collect(),
        None => zones,
    }
}

/// A planned (simulated) deployment of a zone file to a remote server
#[derive(Debug, Clone)]
pub struct DeploymentPlan {
    pub server: String,
    pub domain: String,
    pub reload: bool,
    pub dry_run: bool,
}

impl DeploymentPlan {
    /// The narration steps the deployment walks through
    pub fn steps(&self) -> Vec<String> {
        let mut steps = vec![
            format!("Connecting to {}...", self.server),
            format!("Uploading zone file for {}...", self.domain),
            "Verifying zone file syntax...".to_string(),
        ];

        if self.reload {
            steps.push("Reloading DNS server...".to_string());
        }

        steps.push("Verifying zone is active...".to_string());
        steps
    }
}
