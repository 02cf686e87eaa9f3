use std::sync::Mutex;
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, System};

#[derive(Debug, Clone)]
pub struct StageStats {
    pub stage: String,
    pub stage_elapsed: Duration,
    pub total_elapsed: Duration,
    pub memory_usage_mb: Option<u64>,
}

/// Per-stage timing for one run. Memory figures need the `cli` feature.
pub struct StageMonitor {
    enabled: bool,
    start_time: Instant,
    last_mark: Mutex<Instant>,
    #[cfg(feature = "cli")]
    system: Mutex<System>,
    #[cfg(feature = "cli")]
    pid: Option<Pid>,
}

impl StageMonitor {
    pub fn new(enabled: bool) -> Self {
        let now = Instant::now();
        Self {
            enabled,
            start_time: now,
            last_mark: Mutex::new(now),
            #[cfg(feature = "cli")]
            system: Mutex::new(System::new()),
            #[cfg(feature = "cli")]
            pid: sysinfo::get_current_pid().ok(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Closes the current stage and returns its figures, or `None` when disabled.
    pub fn mark(&self, stage: &str) -> Option<StageStats> {
        if !self.enabled {
            return None;
        }

        let now = Instant::now();
        let stage_elapsed = {
            let mut last = self.last_mark.lock().ok()?;
            let elapsed = now.duration_since(*last);
            *last = now;
            elapsed
        };

        Some(StageStats {
            stage: stage.to_string(),
            stage_elapsed,
            total_elapsed: now.duration_since(self.start_time),
            memory_usage_mb: self.memory_usage_mb(),
        })
    }

    pub fn log_stage(&self, stage: &str) {
        if let Some(stats) = self.mark(stage) {
            match stats.memory_usage_mb {
                Some(mb) => tracing::info!(
                    "📊 {} took {:?} (total {:?}, memory {}MB)",
                    stats.stage,
                    stats.stage_elapsed,
                    stats.total_elapsed,
                    mb
                ),
                None => tracing::info!(
                    "📊 {} took {:?} (total {:?})",
                    stats.stage,
                    stats.stage_elapsed,
                    stats.total_elapsed
                ),
            }
        }
    }

    #[cfg(feature = "cli")]
    fn memory_usage_mb(&self) -> Option<u64> {
        let pid = self.pid?;
        let mut system = self.system.lock().ok()?;
        system.refresh_processes(sysinfo::ProcessesToUpdate::Some(&[pid]), true);
        system.process(pid).map(|p| p.memory() / 1024 / 1024)
    }

    #[cfg(not(feature = "cli"))]
    fn memory_usage_mb(&self) -> Option<u64> {
        None
    }
}

impl Default for StageMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}
