pub mod types;

pub use types::{PlatformProbe, WindowSnapshot};

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "linux")]
pub use linux::LinuxProbe as NativeProbe;

// Fallback for platforms without a native probe: samples are still taken
// and journaled, with unknown window info and zero idle time.
#[cfg(not(target_os = "linux"))]
pub struct StubProbe;

#[cfg(not(target_os = "linux"))]
impl StubProbe {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(not(target_os = "linux"))]
impl Default for StubProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_os = "linux"))]
impl PlatformProbe for StubProbe {
    fn active_window(&self) -> WindowSnapshot {
        WindowSnapshot::default()
    }

    fn idle_time_secs(&self) -> u64 {
        0
    }
}

#[cfg(not(target_os = "linux"))]
pub use self::StubProbe as NativeProbe;
