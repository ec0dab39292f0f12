/// What currently has user focus. Empty fields mean "unknown/none".
#[derive(Debug, Clone, Default)]
pub struct WindowSnapshot {
    pub app_name: String,
    pub window_title: String,
}

/// Host-platform queries consumed by the sampling loop.
///
/// Both calls are infallible: when the platform cannot answer (no display,
/// no focused window, unsupported OS) they return the default snapshot or
/// zero rather than an error, so the loop is never interrupted by a
/// platform query.
pub trait PlatformProbe: Send + Sync {
    fn active_window(&self) -> WindowSnapshot;
    fn idle_time_secs(&self) -> u64;
}
