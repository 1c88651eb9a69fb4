//! Host and process resource readings for the system and memory probes

use std::fmt::Debug;
use std::time::{Duration, Instant};

/// Memory in use and available, in bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryReading {
    pub used_bytes: u64,
    pub total_bytes: u64,
}

impl MemoryReading {
    /// Usage percentage, 0 when the total is unknown
    pub fn usage_percent(&self) -> f64 {
        if self.total_bytes == 0 {
            0.0
        } else {
            self.used_bytes as f64 / self.total_bytes as f64 * 100.0
        }
    }
}

/// Source of resource readings
pub trait ResourceReader: Send + Sync + Debug {
    /// Time since the process started serving
    fn uptime(&self) -> Duration;

    /// One-minute load average
    fn load_average(&self) -> f64;

    /// Memory held by this process against the host total
    fn memory(&self) -> MemoryReading;

    fn cpu_count(&self) -> usize {
        num_cpus::get()
    }
}

/// Readings from the operating system through `sysinfo`.
///
/// Memory is the resident set size of the current process against total host
/// memory. If the process cannot be inspected the reading falls back to host-wide
/// used memory. Without the `system-metrics` feature load and memory read as zero.
#[derive(Debug)]
pub struct SysinfoReader {
    started_at: Instant,
    #[cfg(feature = "system-metrics")]
    system: parking_lot::Mutex<sysinfo::System>,
    #[cfg(feature = "system-metrics")]
    pid: Option<sysinfo::Pid>,
}

impl SysinfoReader {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            #[cfg(feature = "system-metrics")]
            system: parking_lot::Mutex::new(sysinfo::System::new()),
            #[cfg(feature = "system-metrics")]
            pid: sysinfo::get_current_pid().ok(),
        }
    }
}

impl Default for SysinfoReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceReader for SysinfoReader {
    fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    #[cfg(feature = "system-metrics")]
    fn load_average(&self) -> f64 {
        sysinfo::System::load_average().one
    }

    #[cfg(not(feature = "system-metrics"))]
    fn load_average(&self) -> f64 {
        0.0
    }

    #[cfg(feature = "system-metrics")]
    fn memory(&self) -> MemoryReading {
        use sysinfo::{ProcessRefreshKind, ProcessesToUpdate};

        let mut system = self.system.lock();
        system.refresh_memory();

        let resident = self.pid.and_then(|pid| {
            system.refresh_processes_specifics(
                ProcessesToUpdate::Some(&[pid]),
                true,
                ProcessRefreshKind::new().with_memory(),
            );
            system.process(pid).map(|process| process.memory())
        });

        MemoryReading {
            used_bytes: resident.unwrap_or_else(|| system.used_memory()),
            total_bytes: system.total_memory(),
        }
    }

    #[cfg(not(feature = "system-metrics"))]
    fn memory(&self) -> MemoryReading {
        MemoryReading::default()
    }
}
