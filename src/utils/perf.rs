//! Memory statistics of the current process.
//!
//! The driver logs its own high-water mark after solving so runtime sweeps can
//! be correlated with memory use. Values come from `/proc/self/status` and are
//! only available on Linux.

/// Reads a `kB` field such as `VmHWM` from `/proc/self/status`.
#[cfg(target_os = "linux")]
fn read_status_kb(field: &str) -> Option<u64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    status
        .lines()
        .find_map(|line| line.strip_prefix(field)?.strip_prefix(':'))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|value| value.parse().ok())
}

/// Peak resident set size (`VmHWM`) of this process in kilobytes.
///
/// Returns `None` when the value cannot be read.
#[cfg(target_os = "linux")]
pub fn peak_rss_kb() -> Option<u64> {
    read_status_kb("VmHWM")
}

/// Peak resident set size is only tracked on Linux.
#[cfg(not(target_os = "linux"))]
pub fn peak_rss_kb() -> Option<u64> {
    use std::sync::Once;
    static WARN_ONCE: Once = Once::new();
    WARN_ONCE.call_once(|| {
        log::warn!("Peak RSS measurement is only supported on Linux.");
    });
    None
}
