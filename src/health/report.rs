//! Human-readable rendering
//!
//! Presentation only: everything here formats values it is given.

use std::fmt;

use super::snapshot::HealthSnapshot;
use crate::domain::system_info::SystemInfo;

/// Displays a snapshot as labelled lines.
///
/// ```text
/// System Health Status
/// ══════════════════════════════
/// Overall: Warning
///   dependency-injection: Healthy
///   ...
/// Last Check: 14:03:27 UTC
/// ```
///
/// The last-check line is omitted until the first refresh.
pub struct HealthReport<'a>(pub &'a HealthSnapshot);

impl fmt::Display for HealthReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.0;
        writeln!(f, "System Health Status")?;
        writeln!(f, "{}", "═".repeat(30))?;
        writeln!(f, "Overall: {}", snapshot.overall())?;
        for probe in snapshot.probes() {
            writeln!(f, "  {}: {}", probe.name, probe.severity)?;
        }
        if let Some(at) = snapshot.last_checked() {
            writeln!(f, "Last Check: {} UTC", at.format("%H:%M:%S"))?;
        }
        Ok(())
    }
}

/// Displays runtime info as labelled lines
pub struct SystemInfoReport<'a>(pub &'a SystemInfo);

impl fmt::Display for SystemInfoReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = self.0;
        writeln!(f, "System Information")?;
        writeln!(f, "{}", "═".repeat(50))?;
        writeln!(f, "Host: {}", info.hostname)?;
        writeln!(f, "OS: {} ({})", info.os, info.arch)?;
        writeln!(f, "CPUs: {}", info.cpu_count)?;
        writeln!(f, "Package: {} {}", info.package_name, info.package_version)?;
        writeln!(
            f,
            "Memory: {}/{}",
            format_bytes(info.memory.used_bytes()),
            format_bytes(info.memory.total_bytes)
        )?;
        writeln!(
            f,
            "Storage: {}/{}",
            format_bytes(info.storage.used_bytes()),
            format_bytes(info.storage.total_bytes)
        )
    }
}

/// Render a snapshot with [`HealthReport`]
pub fn render_health(snapshot: &HealthSnapshot) -> String {
    HealthReport(snapshot).to_string()
}

/// Render runtime info with [`SystemInfoReport`]
pub fn render_system_info(info: &SystemInfo) -> String {
    SystemInfoReport(info).to_string()
}

/// Format a byte count with one decimal in the largest binary unit >= 1.
pub fn format_bytes(bytes: u64) -> String {
    let kb = bytes as f64 / 1024.0;
    let mb = kb / 1024.0;
    let gb = mb / 1024.0;

    if gb >= 1.0 {
        format!("{:.1} GB", gb)
    } else if mb >= 1.0 {
        format!("{:.1} MB", mb)
    } else if kb >= 1.0 {
        format!("{:.1} KB", kb)
    } else {
        format!("{} B", bytes)
    }
}
