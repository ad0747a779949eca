//! Process/Host Telemetry Probe
//!
//! Samples CPU utilization, resident memory of this process, and - on hosts
//! with Termux-API installed - battery state. Every failure path degrades to
//! a neutral reading; a probe problem must never abort a benchmark run.
//!
//! Battery state is an out-of-process query (`termux-battery-status` prints
//! JSON). The result type distinguishes "unsupported on this host" (command
//! absent, detected once and cached for the run) from "present but errored",
//! so degraded telemetry is still explainable from the logs.

use std::process::Command;

use serde::Deserialize;
use sysinfo::{Pid, System};

use crate::constants::BATTERY_STATUS_COMMAND;

// ============================================================================
// BATTERY
// ============================================================================

/// Outcome of one battery query
#[derive(Debug, Clone, PartialEq)]
pub enum BatteryStatus {
    Available {
        percentage: f64,
        /// Instantaneous draw in microamps; roughly proportional to energy use
        current_ua: f64,
    },
    /// Probe command does not exist on this host
    Unsupported,
    /// Probe command exists but the query failed
    Errored(String),
}

impl BatteryStatus {
    /// Neutral substitution for telemetry rows
    pub fn percentage_or_zero(&self) -> f64 {
        match self {
            BatteryStatus::Available { percentage, .. } => *percentage,
            _ => 0.0,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, BatteryStatus::Available { .. })
    }
}

/// Shape of the Termux-API JSON payload (unknown fields ignored)
#[derive(Debug, Deserialize)]
struct BatteryReport {
    #[serde(default)]
    percentage: f64,
    #[serde(default)]
    current: f64,
}

// ============================================================================
// PROBE
// ============================================================================

/// One snapshot of process and host resources
#[derive(Debug, Clone)]
pub struct ResourceSnapshot {
    /// Mean utilization over logical CPUs; 0.0 on the first sample
    pub cpu_percent: f32,
    /// Resident memory of this process in MB
    pub ram_mb: f64,
    pub battery: BatteryStatus,
}

pub struct ResourceProbe {
    sys: System,
    pid: Option<Pid>,
    battery_unsupported: bool,
}

impl ResourceProbe {
    pub fn new() -> Self {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => Some(pid),
            Err(e) => {
                log::warn!("Cannot resolve current PID ({}); RAM readings will be 0", e);
                None
            }
        };
        Self {
            sys: System::new(),
            pid,
            battery_unsupported: false,
        }
    }

    /// Sample CPU and RAM; query the battery only when asked for, since it
    /// spawns an external process.
    pub fn snapshot(&mut self, with_battery: bool) -> ResourceSnapshot {
        self.sys.refresh_all();

        let cpus = self.sys.cpus();
        let cpu_percent = if cpus.is_empty() {
            0.0
        } else {
            cpus.iter().map(|c| c.cpu_usage()).sum::<f32>() / cpus.len() as f32
        };

        let ram_mb = self
            .pid
            .and_then(|pid| self.sys.process(pid))
            .map(|p| p.memory() as f64 / 1024.0 / 1024.0)
            .unwrap_or(0.0);

        let battery = if with_battery {
            self.read_battery()
        } else {
            BatteryStatus::Unsupported
        };

        ResourceSnapshot {
            cpu_percent,
            ram_mb,
            battery,
        }
    }

    fn read_battery(&mut self) -> BatteryStatus {
        if self.battery_unsupported {
            return BatteryStatus::Unsupported;
        }

        let output = match Command::new(BATTERY_STATUS_COMMAND).output() {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!(
                    "{} not present; battery telemetry disabled for this run",
                    BATTERY_STATUS_COMMAND
                );
                self.battery_unsupported = true;
                return BatteryStatus::Unsupported;
            }
            Err(e) => return BatteryStatus::Errored(e.to_string()),
        };

        if !output.status.success() {
            return BatteryStatus::Errored(format!("probe exited with {}", output.status));
        }

        match serde_json::from_slice::<BatteryReport>(&output.stdout) {
            Ok(report) => BatteryStatus::Available {
                percentage: report.percentage,
                current_ua: report.current,
            },
            Err(e) => BatteryStatus::Errored(format!("unparseable probe output: {}", e)),
        }
    }
}

impl Default for ResourceProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_never_panics_and_is_nonnegative() {
        let mut probe = ResourceProbe::new();
        let snap = probe.snapshot(true);
        assert!(snap.ram_mb >= 0.0);
        assert!(snap.cpu_percent >= 0.0);
    }

    #[test]
    fn test_unavailable_battery_degrades_to_zero() {
        let mut probe = ResourceProbe::new();
        let snap = probe.snapshot(true);
        // CI hosts do not ship Termux-API; whatever the state, the neutral
        // reading contract holds
        if !snap.battery.is_available() {
            assert_eq!(snap.battery.percentage_or_zero(), 0.0);
        }
    }

    #[test]
    fn test_battery_skipped_when_not_requested() {
        let mut probe = ResourceProbe::new();
        let snap = probe.snapshot(false);
        assert_eq!(snap.battery, BatteryStatus::Unsupported);
    }

    #[test]
    fn test_unsupported_probe_is_cached() {
        let mut probe = ResourceProbe::new();
        let first = probe.snapshot(true);
        if first.battery == BatteryStatus::Unsupported {
            assert!(probe.battery_unsupported);
            assert_eq!(probe.snapshot(true).battery, BatteryStatus::Unsupported);
        }
    }
}
