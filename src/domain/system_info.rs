//! Device and runtime metadata
//!
//! Plain data gathered once at startup by a
//! [`RuntimeInfoProvider`](super::ports::RuntimeInfoProvider).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Memory
// =============================================================================

/// Memory figures in bytes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryInfo {
    /// Total memory
    pub total_bytes: u64,
    /// Memory available for new allocations
    pub available_bytes: u64,
}

impl MemoryInfo {
    /// Memory in use
    pub fn used_bytes(&self) -> u64 {
        self.total_bytes.saturating_sub(self.available_bytes)
    }
}

// =============================================================================
// Storage
// =============================================================================

/// Storage figures in bytes for the filesystem holding the data directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageInfo {
    /// Filesystem size
    pub total_bytes: u64,
    /// Free space available to unprivileged users
    pub available_bytes: u64,
}

impl StorageInfo {
    /// Space in use
    pub fn used_bytes(&self) -> u64 {
        self.total_bytes.saturating_sub(self.available_bytes)
    }
}

// =============================================================================
// System Info
// =============================================================================

/// Aggregated runtime information for this process and host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Host name
    pub hostname: String,
    /// Operating system family
    pub os: String,
    /// CPU architecture
    pub arch: String,
    /// Logical CPU count
    pub cpu_count: u32,
    /// Package name of the embedding application
    pub package_name: String,
    /// Package version of the embedding application
    pub package_version: String,
    /// Memory figures
    pub memory: MemoryInfo,
    /// Storage figures
    pub storage: StorageInfo,
    /// When this info was collected, `None` for the placeholder value
    pub collected_at: Option<DateTime<Utc>>,
}

impl Default for SystemInfo {
    fn default() -> Self {
        Self {
            hostname: "Unknown".to_string(),
            os: "Unknown".to_string(),
            arch: "Unknown".to_string(),
            cpu_count: 0,
            package_name: "Unknown".to_string(),
            package_version: "Unknown".to_string(),
            memory: MemoryInfo::default(),
            storage: StorageInfo::default(),
            collected_at: None,
        }
    }
}

impl SystemInfo {
    /// Whether this is real collected data rather than the placeholder
    pub fn is_collected(&self) -> bool {
        self.collected_at.is_some()
    }
}
