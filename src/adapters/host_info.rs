//! Host Runtime Info Adapter
//!
//! Implements the `RuntimeInfoProvider` port from the local host: `hostname`
//! for the host name, `sysinfo` for memory and CPUs, `fs2` for the
//! filesystem holding the data directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};
use tracing::{debug, instrument};

use crate::domain::ports::RuntimeInfoProvider;
use crate::domain::system_info::{MemoryInfo, StorageInfo, SystemInfo};
use crate::error::{Error, Result};

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for host info collection
#[derive(Debug, Clone)]
pub struct HostInfoConfig {
    /// Directory whose filesystem is reported as storage
    pub data_dir: PathBuf,

    /// Package name reported for the embedding application
    pub package_name: String,

    /// Package version reported for the embedding application
    pub package_version: String,
}

impl Default for HostInfoConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            package_name: env!("CARGO_PKG_NAME").to_string(),
            package_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// Host Runtime Info Provider
// =============================================================================

/// Collects [`SystemInfo`] for the local host
#[derive(Debug, Clone, Default)]
pub struct HostRuntimeInfoProvider {
    config: HostInfoConfig,
}

impl HostRuntimeInfoProvider {
    /// Create a provider
    pub fn new(config: HostInfoConfig) -> Self {
        Self { config }
    }
}

/// Figures that need blocking system calls
struct HostFigures {
    hostname: String,
    cpu_count: u32,
    memory: MemoryInfo,
    storage: StorageInfo,
}

#[async_trait]
impl RuntimeInfoProvider for HostRuntimeInfoProvider {
    #[instrument(skip(self), fields(data_dir = %self.config.data_dir.display()))]
    async fn collect(&self) -> Result<SystemInfo> {
        let data_dir = self.config.data_dir.clone();
        let figures = tokio::task::spawn_blocking(move || host_figures(&data_dir))
            .await
            .map_err(|e| Error::Internal(format!("Host info task failed: {}", e)))??;

        debug!(hostname = %figures.hostname, cpu_count = figures.cpu_count, "Collected host info");

        Ok(SystemInfo {
            hostname: figures.hostname,
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            cpu_count: figures.cpu_count,
            package_name: self.config.package_name.clone(),
            package_version: self.config.package_version.clone(),
            memory: figures.memory,
            storage: figures.storage,
            collected_at: Some(Utc::now()),
        })
    }
}

fn host_figures(data_dir: &Path) -> Result<HostFigures> {
    let storage = StorageInfo {
        total_bytes: fs2::total_space(data_dir)?,
        available_bytes: fs2::available_space(data_dir)?,
    };

    let system = System::new_with_specifics(
        RefreshKind::new()
            .with_memory(MemoryRefreshKind::new().with_ram())
            .with_cpu(CpuRefreshKind::new()),
    );

    let hostname = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .ok()
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| "Unknown".to_string());

    Ok(HostFigures {
        hostname,
        cpu_count: system.cpus().len().max(1) as u32,
        memory: MemoryInfo {
            total_bytes: system.total_memory(),
            available_bytes: system.available_memory(),
        },
        storage,
    })
}
